use pocketbook_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("invalid backup path (matches live data): {0}")]
    InvalidBackupPath(PathBuf),
    #[error("unreadable snapshot {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value in snapshot {path}: {source}")]
    InvalidSnapshot {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
    #[error("{path}:{line}: {source}")]
    LegacyLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: CoreError,
    },
    #[error("note cannot be written as a single line: {0:?}")]
    UnrepresentableNote(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Json,
    Core,
    MissingHomeDir,
    InvalidDataPath,
    InvalidBackupPath,
    Corrupt,
    LegacyFormat,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Json(_) => StoreErrorKind::Json,
            StoreError::Core(_) => StoreErrorKind::Core,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::InvalidBackupPath(_) => StoreErrorKind::InvalidBackupPath,
            StoreError::Corrupt { .. } | StoreError::InvalidSnapshot { .. } => {
                StoreErrorKind::Corrupt
            }
            StoreError::LegacyLine { .. } | StoreError::UnrepresentableNote(_) => {
                StoreErrorKind::LegacyFormat
            }
        }
    }

    pub fn is_corrupt(&self) -> bool {
        self.kind() == StoreErrorKind::Corrupt
    }
}
