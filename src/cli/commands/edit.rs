//! `lockbox edit` — change the fields of an existing secret, name included.
//!
//! A rename that collides with another secret aborts before anything is
//! written, so the file still holds the original record.

use crate::cli::{output, prompt, Context};
use crate::errors::Result;
use crate::vault::Secret;

/// Typed in place of a value to clear an optional field.
const CLEAR: &str = "-";

/// Execute the `edit` command.
pub fn execute(ctx: &Context, passphrase: &str, name: &str) -> Result<()> {
    let mut secrets = ctx.load(passphrase)?;
    let current = secrets.get(name)?.clone();

    output::info(&format!(
        "Press Enter to keep a value, or type '{CLEAR}' to clear it."
    ));
    let edited = read_edits(ctx, &current)?;

    let old_key = current.canonical_name();
    let new_key = edited.canonical_name();
    let new_name = edited.name().to_string();

    secrets.replace_for_edit(name, edited)?;
    ctx.store.save(&secrets, passphrase)?;

    let details = (old_key != new_key).then(|| format!("renamed to {new_key}"));
    ctx.audit("edit", Some(&old_key), details.as_deref());
    output::success(&format!("Secret '{new_name}' updated"));

    Ok(())
}

fn read_edits(ctx: &Context, current: &Secret) -> Result<Secret> {
    let new_name = prompt::ask_line(
        &format!("Name [{}]", current.name()),
        Some(current.name()),
    )?;
    let mut edited = current.clone().renamed(new_name)?;

    edited.description = edit_field("Description", current.description.as_deref())?;
    edited.username = edit_field("Username", current.username.as_deref())?;

    let new_passphrase = prompt::ask_confirmed_hidden(
        "New passphrase (Enter keeps the current one)",
        "Repeat new passphrase",
    )?;
    if !new_passphrase.is_empty() {
        edited.passphrase = Some(new_passphrase);
    }

    edited.url = edit_field("URL", current.url.as_deref())?;

    if prompt::confirm("Replace notes?", false)? {
        edited.notes = prompt::ask_notes("Notes", &ctx.settings.notes_sentinel)?;
    }

    Ok(edited)
}

/// Ask for a new value of an optional field, showing the current one.
fn edit_field(label: &str, current: Option<&str>) -> Result<Option<String>> {
    let label = match current {
        Some(value) => format!("{label} [{value}]"),
        None => label.to_string(),
    };
    let answer = prompt::ask_line(&label, current)?;
    Ok(if answer == CLEAR {
        None
    } else {
        prompt::non_empty(answer)
    })
}
