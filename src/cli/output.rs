//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{ListEntry, Secret};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the (name, description) listing in the order given.
pub fn print_list_table(entries: &[ListEntry]) {
    if entries.is_empty() {
        info("No secrets in this store yet.");
        tip("Run `lockbox add` to add your first secret.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Description"]);

    for e in entries {
        table.add_row(vec![
            e.name.clone(),
            e.description.clone().unwrap_or_default(),
        ]);
    }

    println!("{table}");
}

/// Print every field of one secret, notes included.
pub fn print_secret(secret: &Secret) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    let passphrase = secret
        .passphrase
        .as_deref()
        .or_else(|| secret.legacy_password());

    let rows = [
        ("Name", Some(secret.name())),
        ("Description", secret.description.as_deref()),
        ("Username", secret.username.as_deref()),
        ("Passphrase", passphrase),
        ("URL", secret.url.as_deref()),
        ("Notes", secret.notes.as_deref()),
    ];
    for (field, value) in rows {
        table.add_row(vec![field, value.unwrap_or("")]);
    }

    println!("{table}");
}
