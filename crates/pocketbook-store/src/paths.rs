use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pocketbook";
const CONTACTS_FILENAME: &str = "contacts.json";
const NOTES_FILENAME: &str = "notes.json";
const BACKUP_DIR: &str = "backups";

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_DATA_HOME") {
        let path = PathBuf::from(dir);
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        return Ok(path.join(APP_DIR));
    }

    let home = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
    Ok(home.join(".local").join("share").join(APP_DIR))
}

/// `custom` when given, otherwise the XDG data directory.
pub fn resolve_data_dir(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) if path.as_os_str().is_empty() => Err(StoreError::InvalidDataPath(path)),
        Some(path) => Ok(path),
        None => data_dir(),
    }
}

/// Creates `dir` private to the user; an existing directory keeps its mode.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        restrict_dir_permissions(dir)?;
    }
    if !dir.is_dir() {
        return Err(StoreError::InvalidDataPath(dir.to_path_buf()));
    }
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn contacts_path_in(dir: &Path) -> PathBuf {
    dir.join(CONTACTS_FILENAME)
}

pub fn notes_path_in(dir: &Path) -> PathBuf {
    dir.join(NOTES_FILENAME)
}

pub fn backup_path_in(dir: &Path, now_utc: i64) -> PathBuf {
    let stamp = DateTime::<Utc>::from_timestamp(now_utc, 0)
        .unwrap_or_default()
        .format("%Y%m%d-%H%M%S");
    dir.join(BACKUP_DIR).join(format!("{APP_DIR}-{stamp}.json"))
}

#[cfg(unix)]
fn restrict_dir_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = fs::Permissions::from_mode(0o700);
    fs::set_permissions(dir, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
pub(crate) fn restrict_file_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = fs::Permissions::from_mode(0o600);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn restrict_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{backup_path_in, contacts_path_in, ensure_dir, notes_path_in, resolve_data_dir};
    use crate::error::StoreError;
    use std::path::{Path, PathBuf};

    #[cfg(unix)]
    #[test]
    fn ensure_dir_only_restricts_directories_it_creates() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().expect("tempdir");
        let existing = temp.path().join("shared");
        fs::create_dir(&existing).expect("mkdir");
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o755)).expect("chmod");
        ensure_dir(&existing).expect("existing dir");
        let mode = fs::metadata(&existing).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);

        let created = temp.path().join("fresh/data");
        ensure_dir(&created).expect("new dir");
        let mode = fs::metadata(&created).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o700);

        let file = temp.path().join("file");
        fs::write(&file, "x").expect("write");
        assert!(matches!(
            ensure_dir(&file),
            Err(StoreError::InvalidDataPath(_))
        ));
    }

    #[test]
    fn resolve_data_dir_prefers_custom() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/pb"))).expect("dir");
        assert_eq!(dir, PathBuf::from("/tmp/pb"));
        assert!(matches!(
            resolve_data_dir(Some(PathBuf::new())),
            Err(StoreError::InvalidDataPath(_))
        ));
    }

    #[test]
    fn file_names_are_stable() {
        let dir = Path::new("/data");
        assert_eq!(contacts_path_in(dir), PathBuf::from("/data/contacts.json"));
        assert_eq!(notes_path_in(dir), PathBuf::from("/data/notes.json"));
        assert_eq!(
            backup_path_in(dir, 1_700_000_000),
            PathBuf::from("/data/backups/pocketbook-20231114-221320.json")
        );
    }
}
