mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{backup, birthdays, completions, contacts, notes, phones, sort, Context};
use crate::error::{exit_code_for, report_error};
use pocketbook_config as config;
use pocketbook_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "pocketbook", version, about = "Address book and notes in the terminal")]
struct Cli {
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Contact(contacts::ContactCommand),
    #[command(subcommand)]
    Phone(phones::PhoneCommand),
    #[command(subcommand)]
    Birthday(birthdays::BirthdayCommand),
    #[command(subcommand)]
    Note(notes::NoteCommand),
    /// Move files into folders by type
    Sort(sort::SortArgs),
    Backup(backup::BackupArgs),
    /// Replace contacts and notes with a backup's contents
    Restore(backup::RestoreArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        data_dir,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let data_dir = paths::resolve_data_dir(data_dir.or_else(|| app_config.data_dir.clone()))
        .with_context(|| "resolve data directory")?;
    debug!(path = %data_dir.display(), "data directory resolved");

    let store = Store::open(&data_dir)
        .with_context(|| format!("open data directory {}", data_dir.display()))?;

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
    };

    match command {
        Command::Contact(cmd) => contacts::run(&ctx, cmd),
        Command::Phone(cmd) => phones::run(&ctx, cmd),
        Command::Birthday(cmd) => birthdays::run(&ctx, cmd),
        Command::Note(cmd) => notes::run(&ctx, cmd),
        Command::Sort(args) => sort::sort(&ctx, args),
        Command::Backup(args) => backup::backup(&ctx, args),
        Command::Restore(args) => backup::restore(&ctx, args),
        Command::Completions(args) => completions::emit(args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
