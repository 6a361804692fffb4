//! One module per subcommand.
//!
//! Store commands take the master passphrase from their caller, so the
//! one-shot binary and the interactive shell run the same code.

pub mod add;
pub mod audit_cmd;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod list;
pub mod migrate;
pub mod print;
pub mod shell;
