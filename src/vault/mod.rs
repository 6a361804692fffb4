//! Vault module — the encrypted store engine.
//!
//! This module provides:
//! - `Secret` and `SecretSet` record types (`secret`)
//! - JSON serialization of a whole set (`codec`)
//! - Whole-file reads and atomic writes (`format`)
//! - `Store`, which loads, saves and migrates a set against one file (`store`)

pub mod codec;
pub mod format;
pub mod secret;
pub mod store;

// Re-export the most commonly used items.
pub use secret::{ListEntry, Secret, SecretSet};
pub use store::{detect_legacy, migrate, Loaded, Store};
