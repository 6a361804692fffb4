//! `lockbox completions` — print a completion script for a shell.
//!
//! The script covers every subcommand and the global `--file`/`--config`
//! flags, derived from the same clap definition the binary parses.
//!
//!   lockbox completions bash > ~/.local/share/bash-completion/completions/lockbox
//!   lockbox completions fish > ~/.config/fish/completions/lockbox.fish

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut out = io::stdout().lock();
    write_script(shell, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write the completion script for `shell` to `out`.
pub fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin, out);
    Ok(())
}
