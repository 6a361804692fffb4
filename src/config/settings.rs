use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::Argon2Params;
use crate::errors::{LockboxError, Result};
use crate::session::DEFAULT_TIMEOUT_SECS;

/// User configuration, loaded from `~/.lockbox.toml`.
///
/// Every field has a default so Lockbox works without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Store file location. `None` means `~/.lockbox`.
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Seconds before the shell asks for the master passphrase again.
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,

    /// Line that ends multi-line notes input.
    #[serde(default = "default_notes_sentinel")]
    pub notes_sentinel: String,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_session_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_notes_sentinel() -> String {
    ".".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    Argon2Params::default().memory_kib
}

fn default_argon2_iterations() -> u32 {
    Argon2Params::default().iterations
}

fn default_argon2_parallelism() -> u32 {
    Argon2Params::default().parallelism
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: None,
            session_timeout_secs: default_session_timeout_secs(),
            notes_sentinel: default_notes_sentinel(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file looked up in the home directory.
    pub const FILE_NAME: &'static str = ".lockbox.toml";

    /// Name of the default store file in the home directory.
    pub const STORE_FILE_NAME: &'static str = ".lockbox";

    /// Load settings from `path`.
    ///
    /// A missing file yields defaults; an unparsable one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockboxError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;

        if settings.notes_sentinel.contains('\n') {
            return Err(LockboxError::Config(
                "notes_sentinel must be a single line".into(),
            ));
        }

        settings
            .argon2_params()
            .validate()
            .map_err(|e| LockboxError::Config(format!("{}: {e}", path.display())))?;

        Ok(settings)
    }

    /// Default config location: `~/.lockbox.toml`.
    pub fn default_path() -> Result<PathBuf> {
        Ok(home_dir()?.join(Self::FILE_NAME))
    }

    /// Store file to use, with `override_path` (from the CLI) taking
    /// precedence over the configured one, then `~/.lockbox`.
    pub fn store_path(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(p) = override_path {
            return Ok(p.to_path_buf());
        }
        if let Some(p) = &self.store_path {
            return Ok(p.clone());
        }
        Ok(home_dir()?.join(Self::STORE_FILE_NAME))
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| LockboxError::Config("cannot determine home directory".into()))
}

// ── Tests ────────────────────────────────────────────────────────────
