//! `lockbox migrate` — rewrite a legacy store in the current format.
//!
//! Covers both kinds of old data: the unmarked format 1 envelope, and
//! records that still use the pre-rename `password` field. Nothing is
//! upgraded without confirmation.

use crate::cli::{output, prompt, Context};
use crate::errors::Result;
use crate::vault::migrate;

/// Execute the `migrate` command.
pub fn execute(ctx: &Context, passphrase: &str, yes: bool) -> Result<()> {
    let loaded = ctx.store.load_detailed(passphrase)?;

    if !loaded.needs_migration() {
        output::info("Store is already in the current format.");
        return Ok(());
    }

    let legacy_records = loaded.secrets.iter().filter(|s| s.is_legacy()).count();
    let scheme = loaded
        .scheme
        .map_or_else(|| "unknown".to_string(), |s| s.to_string());
    output::info(&format!(
        "Store file: {scheme}; {legacy_records} of {} record(s) use the old 'password' field.",
        loaded.secrets.len()
    ));

    if !yes && !prompt::confirm("Rewrite the store in the current format?", true)? {
        output::info("Cancelled.");
        return Ok(());
    }

    let upgraded = migrate(loaded.secrets);
    ctx.store.save(&upgraded, passphrase)?;

    ctx.audit(
        "migrate",
        None,
        Some(&format!("from {scheme}, {legacy_records} record(s) renamed")),
    );
    output::success("Store upgraded to the current format.");

    Ok(())
}
