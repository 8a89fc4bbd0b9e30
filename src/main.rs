mod app;
mod backup;
mod cli;
mod config;
mod error;
mod prompt;
mod remove;
mod ssh;

use app::{Action, Outcome};
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use config::{Config, HostsPaths};
use error::FixError;
use prompt::TerminalPrompt;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    if cfg!(windows) {
        println!(
            "{}",
            "I know this breaks your heart, but this will not work on Windows".red()
        );
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Fatal error: {:?}", e);
            eprintln!("{}", fatal_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// The single stderr line for a fatal error, with its causes chained on.
fn fatal_message(e: &anyhow::Error) -> String {
    format!("khfix: {:#}", e)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Anything returned as `Err` here is fatal. User-correctable problems are
/// reported and swallowed so the process still exits cleanly.
fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.print_config {
        print!("{}", Config::default_config_content());
        return Ok(());
    }

    // Without a config directory there is usually no home either; that case is
    // reported below, so fall back to defaults here
    let config = match Config::default_config_path() {
        Ok(path) => Config::load_or_default(&path)?,
        Err(_) => Config::default(),
    };
    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(paths) = HostsPaths::for_current_user(config.backup.file_mode) else {
        report(&FixError::NoHomeDir);
        return Ok(());
    };

    let action = if cli.undo {
        Action::Undo
    } else {
        Action::Remove(cli.line)
    };

    let mut prompt = TerminalPrompt::stdio();
    match app::run(&action, &paths, &mut prompt) {
        Ok(Outcome::Restored) => {
            println!("{}", "Previous file version restored".green());
        }
        Ok(Outcome::Removed { line_number }) => {
            tracing::info!("Line {} removed", line_number);
        }
        Ok(Outcome::UndoDeclined) => {}
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => report(&e),
    }

    Ok(())
}

fn report(e: &FixError) {
    match e {
        FixError::HostsFileMissing(path) => {
            println!("{} {}", "Could not locate hosts file: ".red(), path.display());
        }
        FixError::InvalidLineNumber(raw) => {
            println!("Can't convert {} to a line number", raw.red());
        }
        FixError::NotEnoughLines(line_number) => {
            println!(
                "There aren't {} lines in the file, try again",
                line_number.to_string().red()
            );
        }
        FixError::Write { source, .. } => {
            println!("{}\n{}", e, source);
        }
        _ => println!("{}", e.to_string().red()),
    }
}
