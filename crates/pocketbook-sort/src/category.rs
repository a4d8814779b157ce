use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Audio,
    Documents,
    Video,
    Image,
    Archive,
    Book,
    Other,
}

const EXTENSIONS: [(Category, &[&str]); 6] = [
    (Category::Audio, &["mp3", "aiff", "wav", "aac", "flac"]),
    (
        Category::Documents,
        &["docx", "doc", "txt", "pdf", "xls", "xlsx", "pptx", "rtf"],
    ),
    (Category::Video, &["avi", "mp4", "mov", "mkv", "mpeg"]),
    (
        Category::Image,
        &["jpeg", "png", "pcd", "jpg", "svg", "tiff", "raw", "gif", "bmp"],
    ),
    (Category::Archive, &["zip", "7-zip", "7zip", "rar", "gz", "tar"]),
    (Category::Book, &["fb2", "mobi"]),
];

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Audio,
        Category::Documents,
        Category::Video,
        Category::Image,
        Category::Archive,
        Category::Book,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Audio => "Audio",
            Category::Documents => "Documents",
            Category::Video => "Video",
            Category::Image => "Image",
            Category::Archive => "Archive",
            Category::Book => "Book",
            Category::Other => "Other",
        }
    }

    /// Looks the extension up case-insensitively; unknown or missing
    /// extensions land in `Other`.
    pub fn for_path(path: &Path) -> Category {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return Category::Other;
        };
        let ext = ext.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(_, known)| known.contains(&ext.as_str()))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }

    pub fn from_dir_name(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Category;
    use std::path::Path;

    #[test]
    fn known_extensions_map_to_categories() {
        assert_eq!(Category::for_path(Path::new("song.mp3")), Category::Audio);
        assert_eq!(Category::for_path(Path::new("Report.PDF")), Category::Documents);
        assert_eq!(Category::for_path(Path::new("clip.mkv")), Category::Video);
        assert_eq!(Category::for_path(Path::new("a/b/photo.JPG")), Category::Image);
        assert_eq!(Category::for_path(Path::new("backup.tar")), Category::Archive);
        assert_eq!(Category::for_path(Path::new("novel.fb2")), Category::Book);
    }

    #[test]
    fn unknown_or_missing_extensions_are_other() {
        assert_eq!(Category::for_path(Path::new("main.rs")), Category::Other);
        assert_eq!(Category::for_path(Path::new("Makefile")), Category::Other);
    }

    #[test]
    fn dir_names_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_dir_name(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_dir_name("audio"), None);
    }
}
