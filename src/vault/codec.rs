//! Serialization of a whole `SecretSet` to and from bytes.
//!
//! Current payloads are a tagged JSON document:
//!
//! ```text
//! {"format_version": 2, "secrets": {"<canonical name>": { ...record... }}}
//! ```
//!
//! Legacy payloads are the bare map without the wrapper. `decode` reads
//! both. Anything else, including a record stored under a key that is not
//! its canonical name, is a hard failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::secret::{Secret, SecretSet};
use crate::errors::{LockboxError, Result};
use crate::naming::{canonicalize, validate_name};

/// Payload version written by `encode`.
pub const PAYLOAD_VERSION: u8 = 2;

#[derive(Serialize)]
struct DocumentRef<'a> {
    format_version: u8,
    secrets: &'a BTreeMap<String, Secret>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    format_version: u8,
    secrets: BTreeMap<String, Secret>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Tagged(Document),
    Bare(BTreeMap<String, Secret>),
}

/// Serialize the full set. Output is deterministic: records are written
/// in canonical-name order.
pub fn encode(set: &SecretSet) -> Result<Vec<u8>> {
    let doc = DocumentRef {
        format_version: PAYLOAD_VERSION,
        secrets: set.entries(),
    };
    serde_json::to_vec(&doc).map_err(|e| LockboxError::Serialization(format!("encode: {e}")))
}

/// Rebuild a set from bytes produced by `encode` or by the legacy writer.
pub fn decode(bytes: &[u8]) -> Result<SecretSet> {
    let payload: Payload = serde_json::from_slice(bytes)
        .map_err(|e| LockboxError::Serialization(format!("decode: {e}")))?;

    let entries = match payload {
        Payload::Tagged(doc) => {
            if doc.format_version > PAYLOAD_VERSION {
                return Err(LockboxError::Serialization(format!(
                    "unsupported payload version {}",
                    doc.format_version
                )));
            }
            doc.secrets
        }
        Payload::Bare(map) => map,
    };

    for (key, secret) in &entries {
        validate_name(secret.name())
            .map_err(|_| LockboxError::Serialization(format!("record '{key}' has a blank name")))?;
        if *key != canonicalize(secret.name()) {
            return Err(LockboxError::Serialization(format!(
                "record key '{key}' does not match its name"
            )));
        }
    }

    Ok(SecretSet::from_entries(entries))
}
