//! Integration tests for the Lockbox CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`. Stdin
//! is piped, so every prompt reads one line; the master passphrase comes
//! from `LOCKBOX_PASSPHRASE`.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "integration-master";

/// Helper: a temp dir holding a fast-KDF config and the store path.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        dir.child("lockbox.toml")
            .write_str(
                "argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n",
            )
            .unwrap();
        Self { dir }
    }

    fn store(&self) -> std::path::PathBuf {
        self.dir.path().join("store.lockbox")
    }

    /// Command with an isolated home, config and store.
    fn cmd(&self) -> Command {
        let mut cmd = lockbox();
        cmd.env("HOME", self.dir.path())
            .env("LOCKBOX_PASSPHRASE", MASTER)
            .env_remove("LOCKBOX_LOG")
            .arg("--config")
            .arg(self.dir.path().join("lockbox.toml"))
            .arg("--file")
            .arg(self.store());
        cmd
    }

    /// Add the sample "Bank Login" secret, creating the store.
    fn add_bank(&self) {
        self.cmd()
            .arg("add")
            .write_stdin(concat!(
                "y\n",
                "Bank Login\n",
                "checking account\n",
                "alice\n",
                "s3cret-pass\n",
                "s3cret-pass\n",
                "https://bank.example\n",
                "pin hint: birthday\n",
                "second line\n",
                ".\n",
            ))
            .assert()
            .success()
            .stdout(predicate::str::contains("Secret 'Bank Login' added"));
    }
}

/// Helper: get a Command pointing at the lockbox binary.
fn lockbox() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("lockbox").expect("binary should exist")
}

// ---------------------------------------------------------------------------
// Help and usage
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    lockbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted store for credentials"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("print"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn version_flag_shows_version() {
    lockbox()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn no_args_shows_help() {
    lockbox()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_need_no_store() {
    lockbox()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn completions_reject_unknown_shell() {
    lockbox()
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ---------------------------------------------------------------------------
// Missing store
// ---------------------------------------------------------------------------

#[test]
fn list_on_missing_store_fails() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No store file"));
    assert!(!fx.store().exists());
}

#[test]
fn declining_to_create_leaves_no_file() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("add")
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cancelled"));
    assert!(!fx.store().exists());
}

// ---------------------------------------------------------------------------
// Add, list, print
// ---------------------------------------------------------------------------

#[test]
fn add_then_list_and_print() {
    let fx = Fixture::new();
    fx.add_bank();
    assert!(fx.store().exists());

    fx.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank Login"))
        .stdout(predicate::str::contains("checking account"))
        .stdout(predicate::str::contains("s3cret-pass").not());

    fx.cmd()
        .args(["print", "BANK   login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("s3cret-pass"))
        .stdout(predicate::str::contains("https://bank.example"))
        .stdout(predicate::str::contains("second line"));
}

#[test]
fn duplicate_name_is_rejected() {
    let fx = Fixture::new();
    fx.add_bank();

    fx.cmd()
        .arg("add")
        .write_stdin("  bank LOGIN \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn wrong_master_passphrase_fails() {
    let fx = Fixture::new();
    fx.add_bank();

    fx.cmd()
        .env("LOCKBOX_PASSPHRASE", "not-the-master")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong passphrase or corrupted file"));
}

#[test]
fn print_unknown_secret_fails() {
    let fx = Fixture::new();
    fx.add_bank();

    fx.cmd()
        .args(["print", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ---------------------------------------------------------------------------
// Edit and delete
// ---------------------------------------------------------------------------

#[test]
fn edit_renames_and_clears_fields() {
    let fx = Fixture::new();
    fx.add_bank();

    // name, description (keep), username (clear), passphrase x2 (keep),
    // url (keep), replace notes (no)
    fx.cmd()
        .args(["edit", "bank login"])
        .write_stdin("Savings\n\n-\n\n\n\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Secret 'Savings' updated"));

    fx.cmd()
        .args(["print", "savings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("checking account"))
        .stdout(predicate::str::contains("s3cret-pass"))
        .stdout(predicate::str::contains("alice").not());

    fx.cmd()
        .args(["print", "bank login"])
        .assert()
        .failure();
}

#[test]
fn delete_with_force_removes_secret() {
    let fx = Fixture::new();
    fx.add_bank();

    fx.cmd()
        .args(["delete", "Bank Login", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted secret 'Bank Login'"));

    fx.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No secrets"));
}

#[test]
fn delete_declined_keeps_secret() {
    let fx = Fixture::new();
    fx.add_bank();

    fx.cmd()
        .args(["delete", "bank login"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    fx.cmd()
        .args(["print", "bank login"])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// Migration
// ---------------------------------------------------------------------------

#[test]
fn migrate_upgrades_legacy_store() {
    use lockbox::crypto::{self, legacy, Scheme};

    let fx = Fixture::new();
    let payload = br#"{"email":{"name":"email","password":"old-secret"}}"#;
    let data = legacy::encrypt(payload, MASTER.as_bytes()).unwrap();
    std::fs::write(fx.store(), data).unwrap();

    fx.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("email"))
        .stderr(predicate::str::contains("old format"));

    fx.cmd()
        .args(["migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upgraded"));

    let data = std::fs::read(fx.store()).unwrap();
    assert_eq!(crypto::detect_scheme(&data), Scheme::Current);

    fx.cmd()
        .args(["print", "email"])
        .assert()
        .success()
        .stdout(predicate::str::contains("old-secret"));

    fx.cmd()
        .args(["migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in the current format"));
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

#[test]
fn shell_runs_commands_until_quit() {
    let fx = Fixture::new();
    fx.add_bank();

    fx.cmd()
        .arg("shell")
        .write_stdin("list\nprint bank login\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank Login"))
        .stdout(predicate::str::contains("s3cret-pass"));
}
