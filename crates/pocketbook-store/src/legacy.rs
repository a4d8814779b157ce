//! One note per line: `text;tag1;tag2`.

use crate::error::{Result, StoreError};
use pocketbook_core::{CoreError, Note, NoteBook, TagName};
use std::fs;
use std::path::Path;

const SEPARATOR: char = ';';

/// Parses one line; blank lines yield `None`. Empty tag segments are skipped.
pub fn parse_note_line(line: &str) -> std::result::Result<Option<Note>, CoreError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let mut parts = line.split(SEPARATOR);
    let text = parts.next().unwrap_or_default();
    let tags = parts
        .filter(|raw| !raw.trim().is_empty())
        .map(TagName::new)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Note::new(text, tags).map(Some)
}

pub fn format_note_line(note: &Note) -> Result<String> {
    if note.text().contains(SEPARATOR) || note.text().contains('\n') {
        return Err(StoreError::UnrepresentableNote(note.text().to_string()));
    }
    let mut line = note.text().to_string();
    for tag in note.tags() {
        line.push(SEPARATOR);
        line.push_str(tag.as_str());
    }
    Ok(line)
}

pub fn import_note_lines(path: &Path) -> Result<Vec<Note>> {
    let contents = fs::read_to_string(path)?;
    let mut notes = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let parsed = parse_note_line(line).map_err(|source| StoreError::LegacyLine {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        notes.extend(parsed);
    }
    Ok(notes)
}

/// Writes every note, returning how many lines were written.
pub fn export_note_lines(path: &Path, notes: &NoteBook) -> Result<usize> {
    let lines = notes
        .iter()
        .map(format_note_line)
        .collect::<Result<Vec<_>>>()?;
    crate::paths::ensure_parent_dir(path)?;
    let mut contents = lines.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents)?;
    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::{format_note_line, parse_note_line};
    use pocketbook_core::{Note, TagName};

    #[test]
    fn parse_line_with_tags() {
        let note = parse_note_line("Buy milk;shop;errand").unwrap().unwrap();
        assert_eq!(note.text(), "Buy milk");
        let tags: Vec<&str> = note.tags().map(TagName::as_str).collect();
        assert_eq!(tags, vec!["errand", "shop"]);
    }

    #[test]
    fn parse_line_skips_empty_segments() {
        let note = parse_note_line("Buy milk;").unwrap().unwrap();
        assert_eq!(note.tag_count(), 0);
        assert!(parse_note_line("   ").unwrap().is_none());
    }

    #[test]
    fn parse_line_rejects_bad_tags() {
        assert!(parse_note_line("text;two words").is_err());
        assert!(parse_note_line(";tag").is_err());
    }

    #[test]
    fn format_line_sorted_tags() {
        let note = Note::new(
            "Buy milk",
            [TagName::new("shop").unwrap(), TagName::new("errand").unwrap()],
        )
        .unwrap();
        assert_eq!(format_note_line(&note).unwrap(), "Buy milk;errand;shop");
    }

    #[test]
    fn format_line_refuses_separator_in_text() {
        let note = Note::new("a;b", []).unwrap();
        assert!(format_note_line(&note).is_err());
    }
}
