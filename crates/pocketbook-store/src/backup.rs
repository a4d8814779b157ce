use crate::error::{Result, StoreError};
use crate::{json, Store};
use pocketbook_core::{AddressBook, AddressBookSnapshot, NoteBook, NoteBookSnapshot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const BACKUP_FORMAT_VERSION: u32 = 1;

/// Both stores in a single JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub version: u32,
    pub created_at: i64,
    pub contacts: AddressBookSnapshot,
    pub notes: NoteBookSnapshot,
}

impl Store {
    pub fn backup_to(&self, path: &Path, now_utc: i64) -> Result<()> {
        crate::paths::ensure_parent_dir(path)?;
        let target = canonicalize_path(path)?;
        for live in [self.contacts_path(), self.notes_path()] {
            let live_target = canonicalize_path(&live)?;
            if live_target == target || is_same_file_identity(&target, &live_target)? {
                return Err(StoreError::InvalidBackupPath(path.to_path_buf()));
            }
        }

        let document = BackupDocument {
            version: BACKUP_FORMAT_VERSION,
            created_at: now_utc,
            contacts: self.load_contacts()?.to_snapshot(),
            notes: self.load_notes()?.to_snapshot(),
        };
        json::write(&target, &document)
    }

    /// Replaces the live snapshots with the contents of a backup.
    pub fn restore_from(&self, path: &Path) -> Result<(AddressBook, NoteBook)> {
        let document: BackupDocument = json::read(path)?.ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("backup not found: {}", path.display()),
            ))
        })?;
        let invalid = |source| StoreError::InvalidSnapshot {
            path: path.to_path_buf(),
            source,
        };
        let contacts = AddressBook::from_snapshot(&document.contacts).map_err(invalid)?;
        let notes = NoteBook::from_snapshot(&document.notes).map_err(invalid)?;

        let contacts_path = self.contacts_path();
        let notes_path = self.notes_path();
        let staged_contacts = json::stage(&contacts_path, &contacts.to_snapshot())?;
        let staged_notes = match json::stage(&notes_path, &notes.to_snapshot()) {
            Ok(staged) => staged,
            Err(err) => {
                json::discard(&staged_contacts);
                return Err(err);
            }
        };
        json::commit(&staged_contacts, &contacts_path)?;
        json::commit(&staged_notes, &notes_path)?;
        Ok((contacts, notes))
    }
}

fn canonicalize_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(fs::canonicalize(path)?);
    }
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let parent = fs::canonicalize(parent)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidBackupPath(path.to_path_buf()))?;
    Ok(parent.join(file_name))
}

#[cfg(unix)]
fn is_same_file_identity(target: &Path, live: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    if !target.exists() || !live.exists() {
        return Ok(false);
    }
    let target_meta = fs::metadata(target)?;
    let live_meta = fs::metadata(live)?;
    Ok(target_meta.dev() == live_meta.dev() && target_meta.ino() == live_meta.ino())
}

#[cfg(not(unix))]
fn is_same_file_identity(_target: &Path, _live: &Path) -> Result<bool> {
    Ok(false)
}
