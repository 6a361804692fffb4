//! CLI module — Clap argument parser, prompts, output helpers, and commands.

pub mod commands;
pub mod output;
pub mod prompt;

use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{LockboxError, Result};
use crate::vault::{SecretSet, Store};

/// Environment variable that supplies the master passphrase non-interactively.
pub const PASSPHRASE_ENV: &str = "LOCKBOX_PASSPHRASE";

/// Lockbox CLI: local encrypted credential store.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Local encrypted store for credentials",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store file (default: ~/.lockbox)
    #[arg(short, long, env = "LOCKBOX_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Config file (default: ~/.lockbox.toml)
    #[arg(long, env = "LOCKBOX_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a new secret (creates the store on first use)
    Add,

    /// Edit an existing secret, including its name
    Edit {
        /// Secret name (any capitalization or spacing)
        name: String,
    },

    /// Show every field of one secret
    Print {
        /// Secret name
        name: String,
    },

    /// List secret names and descriptions
    List,

    /// Delete a secret
    Delete {
        /// Secret name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Upgrade a legacy store file to the current format
    Migrate {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive session; asks for the passphrase again after inactivity
    Shell,

    /// View the audit log of store operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared state used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved settings and store handle for one invocation.
pub struct Context {
    pub settings: Settings,
    pub store: Store,
}

impl Context {
    /// Load the config file and resolve the store path from CLI flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(p) => p.clone(),
            None => Settings::default_path()?,
        };
        let settings = Settings::load(&config_path)?;
        let path = settings.store_path(cli.file.as_deref())?;
        let store = Store::with_params(path, settings.argon2_params());
        Ok(Self { settings, store })
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Get the master passphrase for this store.
    ///
    /// If the store file does not exist yet, `allow_create` decides whether
    /// to offer creating it (asking for a new passphrase twice) or to fail
    /// with `StoreNotFound`.
    pub fn master_passphrase(&self, allow_create: bool) -> Result<Zeroizing<String>> {
        if self.store.exists() {
            return prompt_master_passphrase();
        }
        if !allow_create {
            return Err(LockboxError::StoreNotFound(self.store_path().to_path_buf()));
        }

        let create = prompt::confirm(
            &format!(
                "No store at {}. Create it?",
                self.store_path().display()
            ),
            true,
        )?;
        if !create {
            return Err(LockboxError::UserCancelled);
        }
        prompt_new_master_passphrase()
    }

    /// Load the set, warning when the file still needs `lockbox migrate`.
    pub fn load(&self, passphrase: &str) -> Result<SecretSet> {
        let loaded = self.store.load_detailed(passphrase)?;
        if loaded.needs_migration() {
            output::warning("This store uses an old format.");
            output::tip("Run `lockbox migrate` to upgrade it.");
        }
        Ok(loaded.secrets)
    }

    /// Record an operation in the audit log (never fails).
    pub fn audit(&self, op: &str, secret: Option<&str>, details: Option<&str>) {
        crate::audit::log_audit(self.store_path(), op, secret, details);
    }
}

/// Get the master passphrase, trying in order:
/// 1. `LOCKBOX_PASSPHRASE` env var (scripting)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_master_passphrase() -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        return Ok(pw);
    }
    Ok(Zeroizing::new(prompt::ask_hidden("Master passphrase")?))
}

/// Ask for a new master passphrase twice until both entries match.
///
/// Also respects `LOCKBOX_PASSPHRASE`.
pub fn prompt_new_master_passphrase() -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        return Ok(pw);
    }

    loop {
        let pw = prompt::ask_confirmed_hidden("Choose master passphrase", "Confirm master passphrase")?;
        if pw.is_empty() {
            output::warning("The master passphrase cannot be empty. Try again.");
            continue;
        }
        return Ok(Zeroizing::new(pw));
    }
}

fn passphrase_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSPHRASE_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}
