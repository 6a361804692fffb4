//! Audit log — SQLite-based operation history.
//!
//! Records every store operation (add, edit, delete, migrate, ...) in a
//! SQLite database next to the store file: `<store file>.audit.db`.
//! Secret values are never recorded, only canonical names.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging. Without the
//! `audit-log` feature, `log_audit` is a no-op.

use std::path::{Path, PathBuf};

/// Path of the audit database belonging to a store file.
pub fn db_path(store_path: &Path) -> PathBuf {
    let mut name = store_path.file_name().unwrap_or_default().to_os_string();
    name.push(".audit.db");
    store_path.with_file_name(name)
}

#[cfg(feature = "audit-log")]
pub use sqlite::{AuditEntry, AuditLog};

/// Record an operation against `store_path`. Never fails the caller.
pub fn log_audit(store_path: &Path, op: &str, secret: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    {
        if let Some(audit) = AuditLog::open(&db_path(store_path)) {
            audit.log(op, secret, details);
        }
    }

    #[cfg(not(feature = "audit-log"))]
    let _ = (store_path, op, secret, details);
}

#[cfg(feature = "audit-log")]
mod sqlite {
    use std::path::Path;

    use chrono::{DateTime, Utc};
    use rusqlite::Connection;

    use crate::errors::{LockboxError, Result};

    /// A single audit log entry.
    #[derive(Debug, Clone)]
    pub struct AuditEntry {
        pub id: i64,
        pub timestamp: DateTime<Utc>,
        pub operation: String,
        pub secret: Option<String>,
        pub details: Option<String>,
    }

    /// SQLite-backed audit log.
    pub struct AuditLog {
        conn: Connection,
    }

    impl AuditLog {
        /// Open (or create) the audit database at `db_path`.
        ///
        /// Returns `None` if the database can't be opened — callers should
        /// treat this as "audit logging unavailable" and continue normally.
        pub fn open(db_path: &Path) -> Option<Self> {
            let conn = Connection::open(db_path).ok()?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = std::fs::Permissions::from_mode(0o600);
                let _ = std::fs::set_permissions(db_path, perms);
            }

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS audit_log (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    timestamp   TEXT NOT NULL,
                    operation   TEXT NOT NULL,
                    secret      TEXT,
                    details     TEXT
                );",
            )
            .ok()?;

            Some(Self { conn })
        }

        /// Record an operation. Fire-and-forget — errors are silently ignored.
        pub fn log(&self, operation: &str, secret: Option<&str>, details: Option<&str>) {
            let now = Utc::now().to_rfc3339();
            let _ = self.conn.execute(
                "INSERT INTO audit_log (timestamp, operation, secret, details)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![now, operation, secret, details],
            );
        }

        /// Most recent entries first, at most `limit`, optionally only those
        /// at or after `since`.
        pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
            let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
            // RFC 3339 strings in UTC sort chronologically.
            let since_str = since.map_or_else(String::new, |ts| ts.to_rfc3339());

            let mut stmt = self
                .conn
                .prepare(
                    "SELECT id, timestamp, operation, secret, details
                     FROM audit_log
                     WHERE timestamp >= ?1
                     ORDER BY id DESC
                     LIMIT ?2",
                )
                .map_err(|e| LockboxError::Audit(format!("query prepare: {e}")))?;

            let rows = stmt
                .query_map(rusqlite::params![since_str, limit_i64], |row| {
                    let ts_str: String = row.get(1)?;
                    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                    Ok(AuditEntry {
                        id: row.get(0)?,
                        timestamp,
                        operation: row.get(2)?,
                        secret: row.get(3)?,
                        details: row.get(4)?,
                    })
                })
                .map_err(|e| LockboxError::Audit(format!("query exec: {e}")))?;

            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| LockboxError::Audit(format!("row parse: {e}")))
        }
    }

}
