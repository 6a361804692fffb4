use clap::Parser;
use lockbox::cli::commands::{add, audit_cmd, completions, delete, edit, list, migrate, print, shell};
use lockbox::cli::{output, Cli, Commands, Context};
use lockbox::{LockboxError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; LOCKBOX_LOG=debug shows which stage rejected a store.
    let filter = EnvFilter::try_from_env("LOCKBOX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        output::error(&e.to_string());
        if let LockboxError::StoreNotFound(_) = e {
            output::tip("Run `lockbox add` to create the store with its first secret.");
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Needs neither config nor store.
    if let Commands::Completions { shell } = cli.command {
        return completions::execute(shell);
    }

    let ctx = Context::from_cli(cli)?;

    match cli.command {
        Commands::Add => {
            let passphrase = ctx.master_passphrase(true)?;
            add::execute(&ctx, &passphrase)
        }
        Commands::Edit { ref name } => {
            let passphrase = ctx.master_passphrase(false)?;
            edit::execute(&ctx, &passphrase, name)
        }
        Commands::Print { ref name } => {
            let passphrase = ctx.master_passphrase(false)?;
            print::execute(&ctx, &passphrase, name)
        }
        Commands::List => {
            let passphrase = ctx.master_passphrase(false)?;
            list::execute(&ctx, &passphrase)
        }
        Commands::Delete { ref name, force } => {
            let passphrase = ctx.master_passphrase(false)?;
            delete::execute(&ctx, &passphrase, name, force)
        }
        Commands::Migrate { yes } => {
            let passphrase = ctx.master_passphrase(false)?;
            migrate::execute(&ctx, &passphrase, yes)
        }
        Commands::Shell => shell::execute(&ctx),
        Commands::Audit { last, ref since } => audit_cmd::execute(&ctx, last, since.as_deref()),
        Commands::Completions { .. } => Ok(()),
    }
}
