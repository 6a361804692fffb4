//! `lockbox list` — display names and descriptions in a table.

use crate::cli::{output, Context};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(ctx: &Context, passphrase: &str) -> Result<()> {
    let secrets = ctx.load(passphrase)?;
    let entries = secrets.list_view();

    output::info(&format!(
        "{} — {} secret(s)",
        ctx.store_path().display(),
        entries.len()
    ));
    output::print_list_table(&entries);

    Ok(())
}
