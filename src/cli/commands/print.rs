//! `lockbox print` — show every field of one secret.

use crate::cli::{output, Context};
use crate::errors::Result;

/// Execute the `print` command.
pub fn execute(ctx: &Context, passphrase: &str, name: &str) -> Result<()> {
    let secrets = ctx.load(passphrase)?;
    output::print_secret(secrets.get(name)?);
    Ok(())
}
