use anyhow::Error;
use pocketbook_config::ConfigError;
use pocketbook_core::{CoreError, CoreErrorKind};
use pocketbook_sort::SortError;
use pocketbook_store::error::{StoreError, StoreErrorKind};
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;
pub const EXIT_AMBIGUOUS: u8 = 4;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            });
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(sort_err) = cause.downcast_ref::<SortError>() {
            return ExitCode::from(sort_exit_code(sort_err));
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(core_exit_code(core_err));
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn core_exit_code(err: &CoreError) -> u8 {
    match err.kind() {
        CoreErrorKind::NotFound => EXIT_NOT_FOUND,
        CoreErrorKind::Ambiguous => EXIT_AMBIGUOUS,
        CoreErrorKind::Validation | CoreErrorKind::Conflict => EXIT_INVALID_INPUT,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    match (err, err.kind()) {
        (StoreError::Core(core), _) => core_exit_code(core),
        (StoreError::Io(io), _) if io.kind() == std::io::ErrorKind::NotFound => EXIT_NOT_FOUND,
        (
            _,
            StoreErrorKind::InvalidDataPath
            | StoreErrorKind::InvalidBackupPath
            | StoreErrorKind::LegacyFormat,
        ) => EXIT_INVALID_INPUT,
        (
            _,
            StoreErrorKind::MissingHomeDir
            | StoreErrorKind::Corrupt
            | StoreErrorKind::Json
            | StoreErrorKind::Io
            | StoreErrorKind::Core,
        ) => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidPageSize(_)
        | ConfigError::InvalidUpcomingDays(_)
        | ConfigError::InvalidDataDir(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn sort_exit_code(err: &SortError) -> u8 {
    match err {
        SortError::MissingDirectory(_) => EXIT_NOT_FOUND,
        SortError::NotADirectory(_) => EXIT_INVALID_INPUT,
        SortError::Io { .. } => EXIT_FAILURE,
    }
}
