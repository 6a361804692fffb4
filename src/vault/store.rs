//! Load and save of the whole `SecretSet` against one file path.
//!
//! `Store` composes the codec, the cipher and whole-file I/O. It holds no
//! secrets between calls: every command loads, mutates and saves, so two
//! commands in a row each see the current file. Concurrent writers race
//! and the last save wins; nothing is locked.

use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{self, Argon2Params, Scheme};
use crate::errors::{LockboxError, Result};

use super::codec;
use super::format;
use super::secret::SecretSet;

/// Handle on one store file.
#[derive(Debug, Clone)]
pub struct Store {
    /// Path to the store file on disk.
    path: PathBuf,

    /// KDF cost used when writing. Reading uses the params in the file.
    kdf: Argon2Params,
}

/// Result of [`Store::load_detailed`].
#[derive(Debug)]
pub struct Loaded {
    pub secrets: SecretSet,

    /// Envelope the file used, or `None` if the file does not exist yet.
    pub scheme: Option<Scheme>,
}

impl Loaded {
    /// The file or its records are in an old shape that `migrate` + `save`
    /// would upgrade.
    pub fn needs_migration(&self) -> bool {
        self.scheme == Some(Scheme::Legacy) || detect_legacy(&self.secrets)
    }
}

impl Store {
    /// Handle with the default Argon2id cost.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_params(path, Argon2Params::default())
    }

    pub fn with_params(path: impl Into<PathBuf>, kdf: Argon2Params) -> Self {
        Self {
            path: path.into(),
            kdf,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `false` means the next `load` returns an empty set.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read, decrypt and decode the whole file.
    ///
    /// A missing file is not an error: it loads as an empty set and nothing
    /// is written until the first `save`. A wrong passphrase and a damaged
    /// file both surface as `DecryptOrFormat`.
    pub fn load(&self, passphrase: &str) -> Result<SecretSet> {
        Ok(self.load_detailed(passphrase)?.secrets)
    }

    /// Like `load`, also reporting which envelope the file used.
    pub fn load_detailed(&self, passphrase: &str) -> Result<Loaded> {
        let Some(data) = format::read_store(&self.path)? else {
            debug!(path = %self.path.display(), "no store file yet, starting empty");
            return Ok(Loaded {
                secrets: SecretSet::new(),
                scheme: None,
            });
        };

        let decrypted = crypto::decrypt(&data, passphrase.as_bytes())?;

        let secrets = codec::decode(&decrypted.plaintext).map_err(|e| {
            debug!(stage = "decode", scheme = %decrypted.scheme, "store rejected: {e}");
            LockboxError::DecryptOrFormat
        })?;

        debug!(
            path = %self.path.display(),
            scheme = %decrypted.scheme,
            records = secrets.len(),
            "store loaded"
        );
        Ok(Loaded {
            secrets,
            scheme: Some(decrypted.scheme),
        })
    }

    /// Encode and encrypt the entire set, then replace the file.
    ///
    /// Always writes the current envelope. No backup of the previous file
    /// is kept.
    pub fn save(&self, secrets: &SecretSet, passphrase: &str) -> Result<()> {
        let plaintext = Zeroizing::new(codec::encode(secrets)?);
        let ciphertext = crypto::encrypt(&plaintext, passphrase.as_bytes(), &self.kdf)?;

        format::write_store(&self.path, &ciphertext)?;
        debug!(path = %self.path.display(), records = secrets.len(), "store saved");
        Ok(())
    }
}

/// `true` if any record still carries the pre-rename `password` field.
pub fn detect_legacy(secrets: &SecretSet) -> bool {
    secrets.iter().any(|s| s.is_legacy())
}

/// Rename the legacy field on every record. The caller must `save` the
/// result to persist the upgrade.
pub fn migrate(mut secrets: SecretSet) -> SecretSet {
    for secret in secrets.iter_mut() {
        secret.upgrade_legacy_fields();
    }
    secrets
}
