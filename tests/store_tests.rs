//! Integration tests for loading and saving whole stores.

use std::fs;

use lockbox::crypto::{self, legacy, Argon2Params, Scheme};
use lockbox::vault::{detect_legacy, migrate, Secret, SecretSet, Store};
use lockbox::LockboxError;
use tempfile::TempDir;

/// Cheapest KDF cost the store accepts, to keep the tests fast.
const FAST: Argon2Params = Argon2Params {
    memory_kib: 8_192,
    iterations: 1,
    parallelism: 1,
};

/// Helper: a store handle on a fresh temp file path.
fn temp_store() -> (TempDir, Store) {
    let dir = TempDir::new().expect("create temp dir");
    let store = Store::with_params(dir.path().join("test.lockbox"), FAST);
    (dir, store)
}

fn sample_set() -> SecretSet {
    let mut set = SecretSet::new();
    set.insert_new(
        Secret::new("Bank Login")
            .unwrap()
            .with_description("checking account")
            .with_username("alice")
            .with_passphrase("correct horse battery staple")
            .with_url("https://bank.example")
            .with_notes("pin hint: birthday\nsecurity question: blue"),
    )
    .unwrap();
    set.insert_new(Secret::new("email").unwrap().with_passphrase("hunter2"))
        .unwrap();
    set
}

// ---------------------------------------------------------------------------
// Save and reload
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_returns_the_same_set() {
    let (_dir, store) = temp_store();
    let set = sample_set();

    store.save(&set, "master").unwrap();
    let loaded = store.load("master").unwrap();

    assert_eq!(loaded, set);
    let bank = loaded.get("BANK   login").unwrap();
    assert_eq!(bank.name(), "Bank Login");
    assert_eq!(
        bank.notes.as_deref(),
        Some("pin hint: birthday\nsecurity question: blue")
    );
}

#[test]
fn saved_file_uses_the_current_envelope() {
    let (_dir, store) = temp_store();
    store.save(&sample_set(), "master").unwrap();

    let data = fs::read(store.path()).unwrap();
    assert_eq!(crypto::detect_scheme(&data), Scheme::Current);

    let loaded = store.load_detailed("master").unwrap();
    assert_eq!(loaded.scheme, Some(Scheme::Current));
    assert!(!loaded.needs_migration());
}

#[test]
fn saved_file_does_not_contain_plaintext() {
    let (_dir, store) = temp_store();
    store.save(&sample_set(), "master").unwrap();

    let data = fs::read(store.path()).unwrap();
    let haystack = String::from_utf8_lossy(&data);
    assert!(!haystack.contains("hunter2"));
    assert!(!haystack.contains("alice"));
}

#[test]
fn save_replaces_previous_contents() {
    let (_dir, store) = temp_store();
    store.save(&sample_set(), "master").unwrap();

    let mut set = store.load("master").unwrap();
    set.remove("email").unwrap();
    store.save(&set, "master").unwrap();

    let reloaded = store.load("master").unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(!reloaded.contains("email"));
}

#[test]
fn listing_is_sorted_by_canonical_name() {
    let (_dir, store) = temp_store();
    let mut set = SecretSet::new();
    for name in ["zeta", "Alpha", "mid dle"] {
        set.insert_new(Secret::new(name).unwrap()).unwrap();
    }
    store.save(&set, "master").unwrap();

    let names: Vec<String> = store
        .load("master")
        .unwrap()
        .list_view()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "mid dle", "zeta"]);
}

#[cfg(unix)]
#[test]
fn store_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store) = temp_store();
    store.save(&sample_set(), "master").unwrap();

    let mode = fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// ---------------------------------------------------------------------------
// Missing and unreadable files
// ---------------------------------------------------------------------------

#[test]
fn missing_file_loads_empty_and_writes_nothing() {
    let (_dir, store) = temp_store();
    assert!(!store.exists());

    let loaded = store.load_detailed("anything").unwrap();
    assert!(loaded.secrets.is_empty());
    assert_eq!(loaded.scheme, None);
    assert!(!store.exists());
}

#[test]
fn wrong_passphrase_is_rejected() {
    let (_dir, store) = temp_store();
    store.save(&sample_set(), "master").unwrap();

    let err = store.load("not the master").unwrap_err();
    assert!(matches!(err, LockboxError::DecryptOrFormat));
}

#[test]
fn tampered_file_is_rejected_like_a_wrong_passphrase() {
    let (_dir, store) = temp_store();
    store.save(&sample_set(), "master").unwrap();

    let mut data = fs::read(store.path()).unwrap();
    let last = data.len() - 1;
    data[last] ^= 0x01;
    fs::write(store.path(), &data).unwrap();

    assert!(matches!(
        store.load("master"),
        Err(LockboxError::DecryptOrFormat)
    ));
}

#[test]
fn tampered_header_is_rejected() {
    let (_dir, store) = temp_store();
    store.save(&sample_set(), "master").unwrap();

    // Flip a salt byte: the header is authenticated with the ciphertext.
    let mut data = fs::read(store.path()).unwrap();
    data[20] ^= 0xff;
    fs::write(store.path(), &data).unwrap();

    assert!(matches!(
        store.load("master"),
        Err(LockboxError::DecryptOrFormat)
    ));
}

#[test]
fn damaged_kdf_cost_is_rejected_without_deriving() {
    let (_dir, store) = temp_store();
    store.save(&sample_set(), "master").unwrap();
    let original = fs::read(store.path()).unwrap();

    // Top byte of memory_kib (offset 8), then of iterations (offset 12).
    for offset in [8, 12] {
        let mut data = original.clone();
        data[offset] ^= 0x40;
        fs::write(store.path(), &data).unwrap();

        assert!(matches!(
            store.load("master"),
            Err(LockboxError::DecryptOrFormat)
        ));
    }
}

#[test]
fn truncated_file_is_rejected() {
    let (_dir, store) = temp_store();
    fs::write(store.path(), b"LKBX\x02short").unwrap();

    assert!(matches!(
        store.load("master"),
        Err(LockboxError::DecryptOrFormat)
    ));
}

#[test]
fn garbage_file_is_rejected() {
    let (_dir, store) = temp_store();
    fs::write(store.path(), b"this was never a store file").unwrap();

    assert!(matches!(
        store.load("master"),
        Err(LockboxError::DecryptOrFormat)
    ));
}

// ---------------------------------------------------------------------------
// Edit collisions
// ---------------------------------------------------------------------------

#[test]
fn colliding_rename_leaves_the_file_untouched() {
    let (_dir, store) = temp_store();
    store.save(&sample_set(), "master").unwrap();
    let before = fs::read(store.path()).unwrap();

    let mut set = store.load("master").unwrap();
    let renamed = set
        .get("bank login")
        .unwrap()
        .clone()
        .renamed("Email")
        .unwrap();
    let err = set.replace_for_edit("bank login", renamed).unwrap_err();
    assert!(matches!(err, LockboxError::DuplicateName(_)));

    // The command aborts without saving.
    assert_eq!(fs::read(store.path()).unwrap(), before);
    let reloaded = store.load("master").unwrap();
    assert_eq!(reloaded, sample_set());
}

// ---------------------------------------------------------------------------
// Legacy files
// ---------------------------------------------------------------------------

/// A format 1 file: CBC envelope around a bare map with `password` fields.
fn write_legacy_file(store: &Store, passphrase: &str) {
    let payload = br#"{
        "bank_login": {"name": "Bank Login", "username": "alice", "password": "old-secret"},
        "email": {"name": "email", "description": "personal"}
    }"#;
    let data = legacy::encrypt(payload, passphrase.as_bytes()).unwrap();
    fs::write(store.path(), data).unwrap();
}

#[test]
fn legacy_file_loads_and_is_detected() {
    let (_dir, store) = temp_store();
    write_legacy_file(&store, "master");

    let loaded = store.load_detailed("master").unwrap();
    assert_eq!(loaded.scheme, Some(Scheme::Legacy));
    assert!(loaded.needs_migration());
    assert!(detect_legacy(&loaded.secrets));

    let bank = loaded.secrets.get("Bank Login").unwrap();
    assert_eq!(bank.legacy_password(), Some("old-secret"));
    assert_eq!(bank.passphrase, None);
}

#[test]
fn legacy_file_with_wrong_passphrase_is_rejected() {
    let (_dir, store) = temp_store();
    write_legacy_file(&store, "master");

    assert!(matches!(
        store.load("wrong"),
        Err(LockboxError::DecryptOrFormat)
    ));
}

#[test]
fn migrate_and_save_upgrades_the_file() {
    let (_dir, store) = temp_store();
    write_legacy_file(&store, "master");

    let set = migrate(store.load("master").unwrap());
    assert!(!detect_legacy(&set));
    store.save(&set, "master").unwrap();

    let loaded = store.load_detailed("master").unwrap();
    assert_eq!(loaded.scheme, Some(Scheme::Current));
    assert!(!loaded.needs_migration());

    let bank = loaded.secrets.get("bank login").unwrap();
    assert_eq!(bank.passphrase.as_deref(), Some("old-secret"));
    assert_eq!(bank.legacy_password(), None);
    assert_eq!(
        loaded.secrets.get("email").unwrap().description.as_deref(),
        Some("personal")
    );
}

#[test]
fn legacy_fields_survive_a_save_without_migrate() {
    let (_dir, store) = temp_store();
    write_legacy_file(&store, "master");

    let set = store.load("master").unwrap();
    store.save(&set, "master").unwrap();

    // The envelope is upgraded, the record fields are not.
    let loaded = store.load_detailed("master").unwrap();
    assert_eq!(loaded.scheme, Some(Scheme::Current));
    assert!(loaded.needs_migration());
}
