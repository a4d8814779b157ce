use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("name must be a non-empty string")]
    EmptyName,
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("invalid birthday {0:?}: expected DD.MM.YYYY")]
    InvalidBirthday(String),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("address cannot be empty")]
    EmptyAddress,
    #[error("note text cannot be empty")]
    EmptyNoteText,
    #[error("invalid tag: {0:?}")]
    InvalidTag(String),
    #[error("invalid timestamp")]
    InvalidTimestamp,
    #[error("invalid page size: {0}")]
    InvalidPageSize(usize),
    #[error("unknown search field: {0}")]
    UnknownSearchField(String),
    #[error("invalid search criterion {0:?}: expected field=value")]
    InvalidCriterion(String),
    #[error("contact not found: {0}")]
    ContactNotFound(String),
    #[error("contact already exists: {0}")]
    ContactExists(String),
    #[error("phone {phone} not present in phones of contact {name}")]
    PhoneNotFound { name: String, phone: String },
    #[error("phone {phone} already present in phones of contact {name}")]
    DuplicatePhone { name: String, phone: String },
    #[error("note not found: {0}")]
    NoteNotFound(String),
    #[error("{count} notes match {locator:?}")]
    AmbiguousNote { locator: String, count: usize },
    #[error("note id used twice: {0}")]
    DuplicateNoteId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorKind {
    Validation,
    NotFound,
    Ambiguous,
    Conflict,
}

impl CoreError {
    pub fn kind(&self) -> CoreErrorKind {
        match self {
            CoreError::EmptyName
            | CoreError::InvalidPhone(_)
            | CoreError::InvalidBirthday(_)
            | CoreError::InvalidEmail(_)
            | CoreError::EmptyAddress
            | CoreError::EmptyNoteText
            | CoreError::InvalidTag(_)
            | CoreError::InvalidTimestamp
            | CoreError::InvalidPageSize(_)
            | CoreError::UnknownSearchField(_)
            | CoreError::InvalidCriterion(_) => CoreErrorKind::Validation,
            CoreError::ContactNotFound(_)
            | CoreError::PhoneNotFound { .. }
            | CoreError::NoteNotFound(_) => CoreErrorKind::NotFound,
            CoreError::AmbiguousNote { .. } => CoreErrorKind::Ambiguous,
            CoreError::ContactExists(_)
            | CoreError::DuplicatePhone { .. }
            | CoreError::DuplicateNoteId(_) => CoreErrorKind::Conflict,
        }
    }
}
