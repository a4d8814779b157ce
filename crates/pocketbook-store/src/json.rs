use crate::error::{Result, StoreError};
use crate::paths;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads a JSON document, or `None` when the file does not exist.
pub(crate) fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes through a sibling temp file so readers never see half a document.
pub(crate) fn write<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let staged = stage(path, value)?;
    commit(&staged, path)
}

/// Writes `value` next to `path` without touching `path` itself, returning
/// the temp file to pass to [`commit`].
pub(crate) fn stage<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf> {
    paths::ensure_parent_dir(path)?;
    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');
    let tmp = sibling(path, ".tmp");
    fs::write(&tmp, contents)?;
    paths::restrict_file_permissions(&tmp)?;
    Ok(tmp)
}

pub(crate) fn commit(staged: &Path, path: &Path) -> Result<()> {
    fs::rename(staged, path)?;
    Ok(())
}

/// Drops a staged file that will not be committed.
pub(crate) fn discard(staged: &Path) {
    let _ = fs::remove_file(staged);
}

/// `path` + `suffix`, or `path` + `suffix` + `.N` for the first free `N`.
pub(crate) fn free_sibling(path: &Path, suffix: &str) -> PathBuf {
    let candidate = sibling(path, suffix);
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|n| sibling(path, &format!("{suffix}.{n}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

pub(crate) fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
