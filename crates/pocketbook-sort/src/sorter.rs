use crate::category::Category;
use crate::error::{io_at, Result, SortError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
    pub category: Category,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortReport {
    pub moved: Vec<MovedFile>,
    pub removed_dirs: Vec<PathBuf>,
}

impl SortReport {
    pub fn count(&self, category: Category) -> usize {
        self.moved
            .iter()
            .filter(|file| file.category == category)
            .count()
    }
}

/// Moves every file under `root` into `root/<Category>/` and then removes
/// the directories left empty, deepest first. `root` itself is kept.
pub fn sort_directory(root: &Path) -> Result<SortReport> {
    if !root.exists() {
        return Err(SortError::MissingDirectory(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(SortError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    collect_files(root, true, &mut files)?;

    let mut report = SortReport::default();
    for from in files {
        let category = Category::for_path(&from);
        let dest_dir = root.join(category.as_str());
        fs::create_dir_all(&dest_dir).map_err(io_at(&dest_dir))?;
        let Some(file_name) = from.file_name() else {
            continue;
        };
        let to = unique_destination(&dest_dir, Path::new(file_name));
        fs::rename(&from, &to).map_err(io_at(&from))?;
        report.moved.push(MovedFile { from, to, category });
    }

    prune_empty_dirs(root, root, &mut report.removed_dirs)?;
    Ok(report)
}

fn collect_files(dir: &Path, top_level: bool, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .map_err(io_at(dir))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_at(dir))?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(io_at(&path))?;
        if file_type.is_dir() {
            let is_category_dir = entry
                .file_name()
                .to_str()
                .and_then(Category::from_dir_name)
                .is_some();
            if top_level && is_category_dir {
                continue;
            }
            collect_files(&path, false, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn unique_destination(dir: &Path, file_name: &Path) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let stem = file_name
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = file_name
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    (1..)
        .map(|n| dir.join(format!("{stem} ({n}){ext}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Returns whether `dir` ended up empty.
fn prune_empty_dirs(dir: &Path, root: &Path, removed: &mut Vec<PathBuf>) -> Result<bool> {
    let mut children = fs::read_dir(dir)
        .map_err(io_at(dir))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_at(dir))?;
    children.sort_by_key(|entry| entry.path());

    let mut empty = true;
    for child in children {
        let path = child.path();
        let is_dir = child.file_type().map_err(io_at(&path))?.is_dir();
        if is_dir && prune_empty_dirs(&path, root, removed)? {
            continue;
        }
        empty = false;
    }

    if empty && dir != root {
        fs::remove_dir(dir).map_err(io_at(dir))?;
        removed.push(dir.to_path_buf());
    }
    Ok(empty)
}

#[cfg(test)]
mod tests {
    use super::sort_directory;
    use crate::category::Category;
    use crate::error::SortError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn files_move_into_category_folders() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("song.mp3"), "a").expect("write");
        fs::write(root.join("notes.txt"), "b").expect("write");
        fs::create_dir_all(root.join("nested/deeper")).expect("mkdir");
        fs::write(root.join("nested/deeper/photo.JPG"), "c").expect("write");
        fs::write(root.join("nested/tool.rs"), "d").expect("write");
        fs::create_dir_all(root.join("empty")).expect("mkdir");

        let report = sort_directory(root).expect("sort");

        assert!(root.join("Audio/song.mp3").is_file());
        assert!(root.join("Documents/notes.txt").is_file());
        assert!(root.join("Image/photo.JPG").is_file());
        assert!(root.join("Other/tool.rs").is_file());
        assert!(!root.join("nested").exists());
        assert!(!root.join("empty").exists());
        assert_eq!(report.moved.len(), 4);
        assert_eq!(report.count(Category::Image), 1);
        assert_eq!(report.removed_dirs.len(), 3);
    }

    #[test]
    fn name_collisions_get_a_counter() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("Documents")).expect("mkdir");
        fs::write(root.join("Documents/cv.pdf"), "old").expect("write");
        fs::write(root.join("cv.pdf"), "new").expect("write");

        sort_directory(root).expect("sort");

        assert_eq!(
            fs::read_to_string(root.join("Documents/cv.pdf")).expect("read"),
            "old"
        );
        assert_eq!(
            fs::read_to_string(root.join("Documents/cv (1).pdf")).expect("read"),
            "new"
        );
    }

    #[test]
    fn sorting_twice_changes_nothing() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        fs::write(root.join("book.mobi"), "a").expect("write");

        sort_directory(root).expect("first sort");
        let second = sort_directory(root).expect("second sort");
        assert!(second.moved.is_empty());
        assert!(root.join("Book/book.mobi").is_file());
    }

    #[test]
    fn missing_root_is_reported() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("nope");
        assert!(matches!(
            sort_directory(&missing),
            Err(SortError::MissingDirectory(_))
        ));

        let file = temp.path().join("file.txt");
        fs::write(&file, "x").expect("write");
        assert!(matches!(
            sort_directory(&file),
            Err(SortError::NotADirectory(_))
        ));
    }
}
