pub mod address_book;
pub mod birthday;
pub mod email;
pub mod field;
pub mod ids;
pub mod note;
pub mod note_book;
pub mod phone;
pub mod record;
pub mod tag;

pub use address_book::{AddressBook, Criterion, UpcomingBirthday};
pub use birthday::{parse_birthday, Birthday, BIRTHDAY_FORMAT};
pub use email::{normalize_email, Email};
pub use field::{normalize_address, normalize_name, parse_optional, Address, Field, Name};
pub use ids::NoteId;
pub use note::{normalize_note_text, Note};
pub use note_book::{NoteBook, NoteLocator};
pub use phone::{normalize_phone, Phone};
pub use record::Record;
pub use tag::{normalize_tag_name, TagName};
