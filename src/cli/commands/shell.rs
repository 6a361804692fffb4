//! `lockbox shell` — interactive session over one store.
//!
//! Each typed line is parsed into an [`Action`] and run as a full
//! load-mutate-save cycle, exactly like the one-shot commands. The master
//! passphrase is kept in a [`SessionGuard`] and asked for again once the
//! inactivity timeout has passed.

use chrono::Utc;
use zeroize::Zeroizing;

use crate::cli::{output, prompt, prompt_master_passphrase, Context};
use crate::errors::{LockboxError, Result};
use crate::session::SessionGuard;

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add,
    Edit(String),
    Print(String),
    List,
    Delete(String),
    Migrate,
    Help,
    Quit,
}

impl Action {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// Names may contain spaces: everything after the verb is the name.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let verb = verb.to_lowercase();

        let named = |make: fn(String) -> Action| {
            if rest.is_empty() {
                Err(LockboxError::CommandFailed(format!(
                    "'{verb}' needs a secret name"
                )))
            } else {
                Ok(make(rest.to_string()))
            }
        };

        let action = match verb.as_str() {
            "add" | "new" => Action::Add,
            "edit" => named(Action::Edit)?,
            "print" | "show" => named(Action::Print)?,
            "list" | "ls" => Action::List,
            "delete" | "rm" => named(Action::Delete)?,
            "migrate" => Action::Migrate,
            "help" | "?" => Action::Help,
            "quit" | "exit" | "q" => Action::Quit,
            other => {
                return Err(LockboxError::CommandFailed(format!(
                    "unknown command '{other}', type 'help' for a list"
                )))
            }
        };
        Ok(Some(action))
    }
}

/// Execute the `shell` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let mut guard = SessionGuard::new(ctx.settings.session_timeout_secs);

    let initial = ctx.master_passphrase(true)?;
    guard.supply(initial.as_str(), Utc::now());
    drop(initial);

    output::info("Type 'help' for commands, 'quit' to leave.");

    loop {
        let Some(line) = prompt::ask_command("lockbox")? else {
            break;
        };

        let action = match Action::parse(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                output::error(&e.to_string());
                continue;
            }
        };

        match action {
            Action::Quit => break,
            Action::Help => print_help(),
            _ => {
                let passphrase = session_passphrase(&mut guard)?;
                match run(ctx, &passphrase, action) {
                    Ok(()) => {}
                    // Unreadable or unwritable store path: give up.
                    Err(e @ LockboxError::Io(_)) => return Err(e),
                    Err(e @ LockboxError::DecryptOrFormat) => {
                        guard.clear();
                        output::error(&e.to_string());
                    }
                    Err(e) => output::error(&e.to_string()),
                }
            }
        }
    }

    Ok(())
}

/// Current passphrase, asking for it again if the session has expired.
fn session_passphrase(guard: &mut SessionGuard) -> Result<Zeroizing<String>> {
    if let Some(session) = guard.current(Utc::now()) {
        return Ok(Zeroizing::new(session.passphrase().to_string()));
    }

    output::info("Session expired or passphrase rejected. Enter the master passphrase again.");
    let passphrase = prompt_master_passphrase()?;
    guard.supply(passphrase.as_str(), Utc::now());
    Ok(passphrase)
}

fn run(ctx: &Context, passphrase: &str, action: Action) -> Result<()> {
    use super::{add, delete, edit, list, migrate, print};

    match action {
        Action::Add => add::execute(ctx, passphrase),
        Action::Edit(name) => edit::execute(ctx, passphrase, &name),
        Action::Print(name) => print::execute(ctx, passphrase, &name),
        Action::List => list::execute(ctx, passphrase),
        Action::Delete(name) => delete::execute(ctx, passphrase, &name, false),
        Action::Migrate => migrate::execute(ctx, passphrase, false),
        Action::Help | Action::Quit => Ok(()),
    }
}

fn print_help() {
    let rows = [
        ("add", "add a new secret"),
        ("edit <name>", "edit a secret"),
        ("print <name>", "show a secret"),
        ("list", "list names and descriptions"),
        ("delete <name>", "delete a secret"),
        ("migrate", "upgrade a legacy store"),
        ("quit", "leave the shell"),
    ];
    for (cmd, what) in rows {
        println!("  {cmd:<16}{what}");
    }
}
