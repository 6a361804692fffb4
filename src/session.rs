//! Master-passphrase sessions and their inactivity timeout.
//!
//! A `Session` remembers the passphrase and when it was supplied. It does
//! not prompt and does not touch the store; the caller checks expiry and
//! supplies a fresh passphrase when needed.

use chrono::{DateTime, Duration, Utc};
use zeroize::Zeroizing;

/// Seconds a supplied passphrase stays valid.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// A supplied master passphrase and the time it was supplied.
pub struct Session {
    passphrase: Zeroizing<String>,
    issued_at: DateTime<Utc>,
}

impl Session {
    /// Start a session now.
    pub fn supply(passphrase: impl Into<String>) -> Self {
        Self::supply_at(passphrase, Utc::now())
    }

    /// Start a session at an explicit time.
    pub fn supply_at(passphrase: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            passphrase: Zeroizing::new(passphrase.into()),
            issued_at: now,
        }
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Expired once strictly more than the default timeout has elapsed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.is_expired_after(now, timeout_from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn is_expired_after(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.issued_at > timeout
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("passphrase", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Holds at most one session and hands it out only while it is fresh.
#[derive(Debug)]
pub struct SessionGuard {
    timeout: Duration,
    session: Option<Session>,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

impl SessionGuard {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: timeout_from_secs(timeout_secs),
            session: None,
        }
    }

    /// Replace any current session with one issued at `now`.
    pub fn supply(&mut self, passphrase: impl Into<String>, now: DateTime<Utc>) -> &Session {
        self.session.insert(Session::supply_at(passphrase, now))
    }

    /// The session, unless there is none or it has expired.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&Session> {
        self.session
            .as_ref()
            .filter(|s| !s.is_expired_after(now, self.timeout))
    }

    /// Forget the session, e.g. after the passphrase was rejected.
    pub fn clear(&mut self) {
        self.session = None;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Timeouts too large for `Duration` saturate to "never expires".
fn timeout_from_secs(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}
