//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - The passphrase-level store cipher with its versioned envelope (`cipher`)
//! - AES-256-GCM encryption and decryption under a raw key (`encryption`)
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - The format 1 AES-256-CBC cipher kept for reading old files (`legacy`)

pub mod cipher;
pub mod encryption;
pub mod kdf;
pub mod legacy;

pub use cipher::{decrypt, detect_scheme, encrypt, Decrypted, Scheme};
pub use kdf::{derive_key, generate_salt, Argon2Params};
