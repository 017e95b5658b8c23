//! warden: approval-gated execution for AI coding agents.
//!
//! Runs shell commands and file edits through the same guard an agent loop
//! uses, prompting on the terminal when the approval mode requires it.

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use cli::{Cli, Commands, ModeAction};
use commands::{ExitError, GuardSettings};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use warden_core::{ActionRequest, ConfigStore, RiskClassifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_store = ConfigStore::new();
    let config = config_store.load();

    let result = match cli.command {
        Commands::Run {
            ref command,
            timeout,
        } => {
            let settings = GuardSettings::resolve(cli.mode, cli.cwd.clone(), &config)?;
            let guard = commands::build_guard(&settings, &config)?;
            let command = command.join(" ");
            let action = match timeout {
                Some(secs) => ActionRequest::shell_with_timeout(command, Duration::from_secs(secs)),
                None => ActionRequest::shell(command),
            };
            commands::run::run(&guard, action).await
        }
        Commands::Write {
            ref path,
            ref contents,
        } => {
            let settings = GuardSettings::resolve(cli.mode, cli.cwd.clone(), &config)?;
            let guard = commands::build_guard(&settings, &config)?;
            let contents = commands::run::contents_or_stdin(contents.clone()).await?;
            commands::run::run(&guard, ActionRequest::write(path.as_str(), contents)).await
        }
        Commands::Edit {
            ref path,
            ref old_text,
            ref new_text,
        } => {
            let settings = GuardSettings::resolve(cli.mode, cli.cwd.clone(), &config)?;
            let guard = commands::build_guard(&settings, &config)?;
            let action = ActionRequest::edit(path.as_str(), old_text.as_str(), new_text.as_str());
            commands::run::run(&guard, action).await
        }
        Commands::Check { ref command } => {
            let classifier = RiskClassifier::new(config.build_catalog()?);
            let mode = cli.mode.unwrap_or(config.approval_mode);
            commands::check::run(&classifier, mode, &command.join(" "));
            Ok(())
        }
        Commands::Signatures => {
            let classifier = RiskClassifier::new(config.build_catalog()?);
            commands::check::list_signatures(&classifier);
            Ok(())
        }
        Commands::Tools { ref name } => commands::tools::run(name.as_deref()),
        Commands::Mode { ref action } => match action {
            None => {
                commands::mode::show(&config_store, config.approval_mode, cli.mode);
                Ok(())
            }
            Some(ModeAction::Set { mode }) => commands::mode::set(&config_store, *mode),
        },
    };

    if let Err(err) = result {
        if let Some(exit_err) = err.downcast_ref::<ExitError>() {
            if !exit_err.message.is_empty() {
                eprintln!("{}", exit_err.message);
            }
            std::process::exit(exit_err.code);
        }
        return Err(err);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warden=debug,warden_core=debug,warden_tools=debug")
    } else if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
