//! The `Secret` record and the `SecretSet` that holds a whole store.
//!
//! A `SecretSet` is keyed by canonical name (see [`crate::naming`]).
//! Canonical names are unique within a set: inserting a colliding name
//! fails instead of overwriting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{LockboxError, Result};
use crate::naming::{canonicalize, validate_name};

/// A single credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Secret {
    /// Display name as typed by the user.
    name: String,

    /// Short description shown in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Free text, line breaks preserved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Pre-rename name of `passphrase`, only present in legacy records.
    #[serde(
        rename = "password",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    legacy_password: Option<String>,
}

impl Secret {
    /// Create a record with only a name. Blank names are rejected.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            description: None,
            username: None,
            passphrase: None,
            url: None,
            notes: None,
            legacy_password: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Return a copy of this record under a different display name.
    pub fn renamed(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lookup key this record is stored under.
    pub fn canonical_name(&self) -> String {
        canonicalize(&self.name)
    }

    /// Value of the legacy `password` field, if this record still has it.
    pub fn legacy_password(&self) -> Option<&str> {
        self.legacy_password.as_deref()
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy_password.is_some()
    }

    /// Move the legacy `password` value into `passphrase`.
    ///
    /// An existing `passphrase` is kept and the legacy value dropped.
    pub fn upgrade_legacy_fields(&mut self) {
        if let Some(old) = self.legacy_password.take() {
            if self.passphrase.is_none() {
                self.passphrase = Some(old);
            }
        }
    }
}

/// One row of a listing: display name and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub description: Option<String>,
}

/// All records of one store file, keyed by canonical name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretSet {
    entries: BTreeMap<String, Secret>,
}

impl SecretSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from decoded entries. The codec has already checked
    /// that every key matches its record.
    pub(crate) fn from_entries(entries: BTreeMap<String, Secret>) -> Self {
        Self { entries }
    }

    pub(crate) fn entries(&self) -> &BTreeMap<String, Secret> {
        &self.entries
    }

    /// Insert a brand-new record.
    ///
    /// Fails with `DuplicateName` if its canonical name is already taken;
    /// the set is left unchanged.
    pub fn insert_new(&mut self, secret: Secret) -> Result<()> {
        let key = secret.canonical_name();
        if self.entries.contains_key(&key) {
            return Err(LockboxError::DuplicateName(secret.name));
        }
        self.entries.insert(key, secret);
        Ok(())
    }

    /// Replace the record at `old_name` with `secret`, which may carry a
    /// different name.
    ///
    /// The old entry is removed first. If the new canonical name belongs
    /// to a different existing record the call fails with `DuplicateName`
    /// and the old entry stays removed from this in-memory set; the caller
    /// decides whether to save anything.
    pub fn replace_for_edit(&mut self, old_name: &str, secret: Secret) -> Result<()> {
        let old_key = canonicalize(old_name);
        if self.entries.remove(&old_key).is_none() {
            return Err(LockboxError::SecretNotFound(old_name.to_string()));
        }

        let new_key = secret.canonical_name();
        if self.entries.contains_key(&new_key) {
            return Err(LockboxError::DuplicateName(secret.name));
        }
        self.entries.insert(new_key, secret);
        Ok(())
    }

    /// Remove and return the record named `name` (any spelling that
    /// canonicalizes to its key).
    pub fn remove(&mut self, name: &str) -> Result<Secret> {
        self.entries
            .remove(&canonicalize(name))
            .ok_or_else(|| LockboxError::SecretNotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Result<&Secret> {
        self.entries
            .get(&canonicalize(name))
            .ok_or_else(|| LockboxError::SecretNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&canonicalize(name))
    }

    /// Names and descriptions sorted by canonical name, ascending.
    pub fn list_view(&self) -> Vec<ListEntry> {
        // BTreeMap iterates in key order, which is canonical-name order.
        self.entries
            .values()
            .map(|s| ListEntry {
                name: s.name.clone(),
                description: s.description.clone(),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Secret> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Secret> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
