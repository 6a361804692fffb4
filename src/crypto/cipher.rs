//! Passphrase-level encrypt/decrypt of a whole store payload.
//!
//! `encrypt` always produces a format 2 envelope:
//!
//! ```text
//! [LKBX: 4 bytes][version: 1 byte][argon2 params: 12 bytes][salt: 32 bytes][nonce | ciphertext | tag]
//! ```
//!
//! The 49-byte header is authenticated as AES-GCM associated data.
//! Input without the magic is taken to be a format 1 (legacy, unmarked)
//! blob and handed to [`super::legacy`].

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use super::encryption;
use super::kdf::{self, Argon2Params, PARAMS_LEN, SALT_LEN};
use super::legacy;
use crate::errors::{LockboxError, Result};

/// Magic bytes at the start of every format 2 file.
const MAGIC: &[u8; 4] = b"LKBX";

/// Envelope version written by `encrypt`.
pub const CURRENT_VERSION: u8 = 2;

/// magic + version + params + salt
const HEADER_LEN: usize = 4 + 1 + PARAMS_LEN + SALT_LEN;

/// Which envelope a ciphertext used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Unmarked AES-256-CBC keyed from SHA-256 of the passphrase.
    Legacy,
    /// Argon2id + AES-256-GCM with a versioned header.
    Current,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Legacy => write!(f, "format 1 (legacy)"),
            Scheme::Current => write!(f, "format {CURRENT_VERSION}"),
        }
    }
}

/// A decrypted payload and the envelope it came from.
pub struct Decrypted {
    pub plaintext: Zeroizing<Vec<u8>>,
    pub scheme: Scheme,
}

/// Report which envelope `data` uses without decrypting it.
pub fn detect_scheme(data: &[u8]) -> Scheme {
    if data.starts_with(MAGIC) {
        Scheme::Current
    } else {
        Scheme::Legacy
    }
}

/// Encrypt `plaintext` under `passphrase` with a fresh salt and nonce.
pub fn encrypt(plaintext: &[u8], passphrase: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    let salt = kdf::generate_salt();
    let key = kdf::derive_key(passphrase, &salt, params)?;

    let mut header = Vec::with_capacity(HEADER_LEN);
    header.extend_from_slice(MAGIC);
    header.push(CURRENT_VERSION);
    header.extend_from_slice(&params.to_bytes());
    header.extend_from_slice(&salt);

    let sealed = encryption::encrypt(&key[..], plaintext, &header)?;

    let mut output = header;
    output.extend_from_slice(&sealed);
    Ok(output)
}

/// Decrypt a blob written by `encrypt` or by the legacy writer.
///
/// Every failure is `DecryptOrFormat`; the stage that failed is only
/// logged at debug level.
pub fn decrypt(data: &[u8], passphrase: &[u8]) -> Result<Decrypted> {
    match detect_scheme(data) {
        Scheme::Legacy => {
            let plaintext = legacy::decrypt(data, passphrase).map_err(|e| {
                debug!(stage = "legacy-decrypt", "store rejected: {e}");
                LockboxError::DecryptOrFormat
            })?;
            Ok(Decrypted {
                plaintext: Zeroizing::new(plaintext),
                scheme: Scheme::Legacy,
            })
        }
        Scheme::Current => {
            if data.len() < HEADER_LEN {
                debug!(stage = "envelope", "store rejected: truncated header");
                return Err(LockboxError::DecryptOrFormat);
            }
            let (header, sealed) = data.split_at(HEADER_LEN);

            let version = header[4];
            if version != CURRENT_VERSION {
                debug!(stage = "envelope", version, "store rejected: unknown version");
                return Err(LockboxError::DecryptOrFormat);
            }

            let mut params_bytes = [0u8; PARAMS_LEN];
            params_bytes.copy_from_slice(&header[5..5 + PARAMS_LEN]);
            let params = Argon2Params::from_bytes(&params_bytes);
            // The header is only authenticated after key derivation, so its
            // cost must be bounded before it is trusted.
            if let Err(e) = params.validate() {
                debug!(stage = "envelope", "store rejected: {e}");
                return Err(LockboxError::DecryptOrFormat);
            }
            let salt = &header[5 + PARAMS_LEN..];

            let key = kdf::derive_key(passphrase, salt, &params).map_err(|e| {
                debug!(stage = "kdf", "store rejected: {e}");
                LockboxError::DecryptOrFormat
            })?;

            let plaintext = encryption::decrypt(&key[..], sealed, header).map_err(|e| {
                debug!(stage = "decrypt", "store rejected: {e}");
                LockboxError::DecryptOrFormat
            })?;
            Ok(Decrypted {
                plaintext: Zeroizing::new(plaintext),
                scheme: Scheme::Current,
            })
        }
    }
}
