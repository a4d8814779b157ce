//! Plain-value mirrors of the stores, used by persistence and `--json` output.
//!
//! Snapshots hold only strings so any encoder can write them; rebuilding a
//! store from a snapshot runs every field validator again.

use crate::domain::{
    parse_optional, Address, AddressBook, Birthday, Email, Name, Note, NoteBook, NoteId, Phone,
    Record, TagName,
};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSnapshot {
    pub name: String,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBookSnapshot {
    #[serde(default)]
    pub contacts: Vec<ContactSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NoteId>,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteBookSnapshot {
    #[serde(default)]
    pub notes: Vec<NoteSnapshot>,
}

impl From<&Record> for ContactSnapshot {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name().to_string(),
            phones: record.phones().iter().map(Phone::to_string).collect(),
            birthday: record.birthday().map(Birthday::to_string),
            address: record.address().map(Address::to_string),
            email: record.email().map(Email::to_string),
        }
    }
}

impl TryFrom<&ContactSnapshot> for Record {
    type Error = CoreError;

    fn try_from(snapshot: &ContactSnapshot) -> Result<Self, Self::Error> {
        let mut record = Record::new(Name::new(&snapshot.name)?);
        for phone in &snapshot.phones {
            record.add_phone(Phone::new(phone)?);
        }
        if let Some(birthday) = parse_optional::<Birthday>(snapshot.birthday.as_deref())? {
            record.set_birthday(birthday);
        }
        record.set_address(parse_optional(snapshot.address.as_deref())?);
        record.set_email(parse_optional(snapshot.email.as_deref())?);
        Ok(record)
    }
}

impl From<&Note> for NoteSnapshot {
    fn from(note: &Note) -> Self {
        Self {
            id: Some(note.id()),
            text: note.text().to_string(),
            tags: note.tags().map(TagName::to_string).collect(),
        }
    }
}

impl TryFrom<&NoteSnapshot> for Note {
    type Error = CoreError;

    fn try_from(snapshot: &NoteSnapshot) -> Result<Self, Self::Error> {
        let tags = snapshot
            .tags
            .iter()
            .map(|raw| TagName::new(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Note::with_id(snapshot.id.unwrap_or_default(), &snapshot.text, tags)
    }
}

impl AddressBook {
    pub fn to_snapshot(&self) -> AddressBookSnapshot {
        AddressBookSnapshot {
            contacts: self.iter().map(ContactSnapshot::from).collect(),
        }
    }

    pub fn from_snapshot(snapshot: &AddressBookSnapshot) -> Result<Self, CoreError> {
        let mut book = AddressBook::new();
        for contact in &snapshot.contacts {
            book.add_record(Record::try_from(contact)?);
        }
        Ok(book)
    }
}

impl NoteBook {
    pub fn to_snapshot(&self) -> NoteBookSnapshot {
        NoteBookSnapshot {
            notes: self.iter().map(NoteSnapshot::from).collect(),
        }
    }

    pub fn from_snapshot(snapshot: &NoteBookSnapshot) -> Result<Self, CoreError> {
        let mut book = NoteBook::new();
        for note in &snapshot.notes {
            let note = Note::try_from(note)?;
            if book.get(note.id()).is_some() {
                return Err(CoreError::DuplicateNoteId(note.id().to_string()));
            }
            book.add_note(note);
        }
        Ok(book)
    }
}
