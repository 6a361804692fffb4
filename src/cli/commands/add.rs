//! `lockbox add` — create a new secret.

use crate::cli::{output, prompt, Context};
use crate::errors::{LockboxError, Result};
use crate::naming::validate_name;
use crate::vault::{Secret, SecretSet};

/// Execute the `add` command.
pub fn execute(ctx: &Context, passphrase: &str) -> Result<()> {
    let mut secrets = ctx.load(passphrase)?;

    let secret = read_new_secret(ctx, &secrets)?;
    let key = secret.canonical_name();
    let name = secret.name().to_string();

    secrets.insert_new(secret)?;
    ctx.store.save(&secrets, passphrase)?;

    ctx.audit("add", Some(&key), None);
    output::success(&format!(
        "Secret '{name}' added ({} total)",
        secrets.len()
    ));

    Ok(())
}

/// Prompt for every field of a new record.
fn read_new_secret(ctx: &Context, existing: &SecretSet) -> Result<Secret> {
    let name = loop {
        let name = prompt::ask_line("Name", None)?;
        if validate_name(&name).is_err() {
            output::warning("The name cannot be empty.");
            continue;
        }
        break name;
    };

    // Fail before asking for the remaining fields.
    if existing.contains(&name) {
        return Err(LockboxError::DuplicateName(name));
    }

    let mut secret = Secret::new(name)?;
    secret.description = prompt::non_empty(prompt::ask_line("Description", None)?);
    secret.username = prompt::non_empty(prompt::ask_line("Username", None)?);
    secret.passphrase = prompt::non_empty(prompt::ask_confirmed_hidden(
        "Passphrase",
        "Repeat passphrase",
    )?);
    secret.url = prompt::non_empty(prompt::ask_line("URL", None)?);
    secret.notes = prompt::ask_notes("Notes", &ctx.settings.notes_sentinel)?;

    Ok(secret)
}
