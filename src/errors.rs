use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Lockbox.
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Deliberately covers both a wrong passphrase and a damaged file;
    /// the two cannot be told apart and are never reported separately.
    #[error("Wrong passphrase or corrupted file")]
    DecryptOrFormat,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Store errors ---
    #[error("No store file at {0}")]
    StoreNotFound(PathBuf),

    #[error("A secret named '{0}' already exists")]
    DuplicateName(String),

    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    #[error("Secret name cannot be empty")]
    EmptyName,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Entries do not match")]
    ConfirmationMismatch,

    #[error("Audit error: {0}")]
    Audit(String),
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
