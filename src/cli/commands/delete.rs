//! `lockbox delete` — remove a secret from the store.

use crate::cli::{output, prompt, Context};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(ctx: &Context, passphrase: &str, name: &str, force: bool) -> Result<()> {
    let mut secrets = ctx.load(passphrase)?;
    let removed = secrets.remove(name)?;

    // Unless --force is set, ask for confirmation before saving.
    if !force && !prompt::confirm(&format!("Delete secret '{}'?", removed.name()), false)? {
        output::info("Cancelled.");
        return Ok(());
    }

    ctx.store.save(&secrets, passphrase)?;

    ctx.audit("delete", Some(&removed.canonical_name()), None);
    output::success(&format!("Deleted secret '{}'", removed.name()));

    Ok(())
}
