//! `lockbox audit` — display the audit log.
//!
//! Usage:
//!   lockbox audit               # show last 50 entries
//!   lockbox audit --last 20     # show last 20
//!   lockbox audit --since 7d    # entries from last 7 days

use chrono::{DateTime, Duration, Utc};

use crate::cli::Context;
use crate::errors::{LockboxError, Result};

/// Execute the `audit` command.
#[cfg(feature = "audit-log")]
pub fn execute(ctx: &Context, last: usize, since: Option<&str>) -> Result<()> {
    use crate::audit::{self, AuditLog};
    use crate::cli::output;

    let since_dt = since.map(parse_since).transpose()?;

    let db = audit::db_path(ctx.store_path());
    if !db.exists() {
        output::info("No audit entries found.");
        return Ok(());
    }
    let log = AuditLog::open(&db)
        .ok_or_else(|| LockboxError::Audit("failed to open audit database".into()))?;

    let entries = log.query(last, since_dt)?;
    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);
    Ok(())
}

#[cfg(not(feature = "audit-log"))]
pub fn execute(_ctx: &Context, _last: usize, _since: Option<&str>) -> Result<()> {
    Err(LockboxError::Audit(
        "this build has no audit log (enable the `audit-log` feature)".into(),
    ))
}

/// Parse a lookback like "7d", "24h" or "30m" into the cutoff time.
fn parse_since(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let invalid = || {
        LockboxError::CommandFailed(format!(
            "invalid duration '{input}' (use a form like 7d, 24h or 30m)"
        ))
    };

    let (split, _) = input.char_indices().last().ok_or_else(invalid)?;
    let (num_str, unit) = input.split_at(split);
    let num: i64 = num_str.parse().map_err(|_| invalid())?;

    let lookback = match unit {
        "d" => Duration::try_days(num),
        "h" => Duration::try_hours(num),
        "m" => Duration::try_minutes(num),
        _ => None,
    }
    .ok_or_else(invalid)?;

    Utc::now().checked_sub_signed(lookback).ok_or_else(invalid)
}

#[cfg(feature = "audit-log")]
fn print_audit_table(entries: &[crate::audit::AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Secret", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            colorize_operation(&entry.operation),
            entry.secret.clone().unwrap_or_else(|| "-".into()),
            entry.details.clone().unwrap_or_else(|| "-".into()),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

#[cfg(feature = "audit-log")]
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "add" => style(op).green().to_string(),
        "edit" => style(op).blue().to_string(),
        "delete" => style(op).red().to_string(),
        "migrate" => style(op).yellow().to_string(),
        _ => op.to_string(),
    }
}
