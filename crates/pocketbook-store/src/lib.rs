pub mod backup;
pub mod error;
mod json;
pub mod legacy;
pub mod paths;

use crate::error::{Result, StoreError};
use pocketbook_core::{AddressBook, AddressBookSnapshot, NoteBook, NoteBookSnapshot};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON snapshot files for the address book and the notebook, kept in one
/// data directory.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: &Path) -> Result<Self> {
        paths::ensure_dir(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn contacts_path(&self) -> PathBuf {
        paths::contacts_path_in(&self.dir)
    }

    pub fn notes_path(&self) -> PathBuf {
        paths::notes_path_in(&self.dir)
    }

    pub fn default_backup_path(&self, now_utc: i64) -> PathBuf {
        paths::backup_path_in(&self.dir, now_utc)
    }

    /// An absent file loads as an empty book.
    pub fn load_contacts(&self) -> Result<AddressBook> {
        let path = self.contacts_path();
        let snapshot: AddressBookSnapshot = json::read(&path)?.unwrap_or_default();
        AddressBook::from_snapshot(&snapshot)
            .map_err(|source| StoreError::InvalidSnapshot { path, source })
    }

    pub fn save_contacts(&self, book: &AddressBook) -> Result<()> {
        json::write(&self.contacts_path(), &book.to_snapshot())
    }

    pub fn load_notes(&self) -> Result<NoteBook> {
        let path = self.notes_path();
        let snapshot: NoteBookSnapshot = json::read(&path)?.unwrap_or_default();
        NoteBook::from_snapshot(&snapshot)
            .map_err(|source| StoreError::InvalidSnapshot { path, source })
    }

    pub fn save_notes(&self, notes: &NoteBook) -> Result<()> {
        json::write(&self.notes_path(), &notes.to_snapshot())
    }

    /// Moves an unreadable snapshot out of the way, returning its new path.
    /// Earlier quarantined copies are kept.
    pub fn quarantine(&self, path: &Path) -> Result<PathBuf> {
        let target = json::free_sibling(path, ".corrupt");
        fs::rename(path, &target)?;
        Ok(target)
    }
}
