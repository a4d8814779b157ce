pub mod domain;
pub mod error;
pub mod rules;
pub mod snapshot;
pub mod time;

pub use domain::*;
pub use error::{CoreError, CoreErrorKind};
pub use rules::*;
pub use snapshot::{AddressBookSnapshot, ContactSnapshot, NoteBookSnapshot, NoteSnapshot};
