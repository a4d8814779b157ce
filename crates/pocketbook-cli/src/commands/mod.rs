use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use pocketbook_config::AppConfig;
use pocketbook_core::{parse_birthday, AddressBook, NoteBook};
use pocketbook_store::error::StoreError;
use pocketbook_store::Store;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

pub mod backup;
pub mod birthdays;
pub mod completions;
pub mod contacts;
pub mod notes;
pub mod phones;
pub mod sort;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

impl Context<'_> {
    pub fn load_contacts(&self) -> Result<AddressBook> {
        let path = self.store.contacts_path();
        load_or_quarantine(self.store, &path, self.store.load_contacts())
    }

    pub fn save_contacts(&self, book: &AddressBook) -> Result<()> {
        let path = self.store.contacts_path();
        self.store
            .save_contacts(book)
            .with_context(|| format!("save contacts to {}", path.display()))?;
        debug!(path = %path.display(), contacts = book.len(), "contacts saved");
        Ok(())
    }

    pub fn load_notes(&self) -> Result<NoteBook> {
        let path = self.store.notes_path();
        load_or_quarantine(self.store, &path, self.store.load_notes())
    }

    pub fn save_notes(&self, notes: &NoteBook) -> Result<()> {
        let path = self.store.notes_path();
        self.store
            .save_notes(notes)
            .with_context(|| format!("save notes to {}", path.display()))?;
        debug!(path = %path.display(), notes = notes.len(), "notes saved");
        Ok(())
    }
}

/// An unreadable snapshot is moved aside and the command starts from an
/// empty book.
fn load_or_quarantine<T: Default>(
    store: &Store,
    path: &Path,
    loaded: Result<T, StoreError>,
) -> Result<T> {
    match loaded {
        Ok(book) => Ok(book),
        Err(err) if err.is_corrupt() => {
            let moved = store
                .quarantine(path)
                .with_context(|| format!("move aside unreadable file {}", path.display()))?;
            warn!(
                error = %err,
                moved_to = %moved.display(),
                "unreadable data file, starting empty"
            );
            Ok(T::default())
        }
        Err(err) => Err(err).with_context(|| format!("load {}", path.display())),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// `--today` override for date-relative commands.
pub fn resolve_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => parse_birthday(raw)
            .map_err(|_| invalid_input(format!("invalid --today date: {raw}"))),
        None => Ok(pocketbook_core::time::today()),
    }
}
