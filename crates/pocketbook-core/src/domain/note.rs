use crate::domain::ids::NoteId;
use crate::domain::TagName;
use crate::error::CoreError;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    text: String,
    tags: BTreeSet<TagName>,
}

impl Note {
    pub fn new(text: &str, tags: impl IntoIterator<Item = TagName>) -> Result<Self, CoreError> {
        Self::with_id(NoteId::new(), text, tags)
    }

    pub fn with_id(
        id: NoteId,
        text: &str,
        tags: impl IntoIterator<Item = TagName>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            text: normalize_note_text(text)?,
            tags: tags.into_iter().collect(),
        })
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tags in alphabetical order.
    pub fn tags(&self) -> impl Iterator<Item = &TagName> {
        self.tags.iter()
    }

    pub(crate) fn reassign_id(&mut self) {
        self.id = NoteId::new();
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), CoreError> {
        self.text = normalize_note_text(text)?;
        Ok(())
    }

    /// Returns `false` when the note already carried `tag`.
    pub fn add_tag(&mut self, tag: TagName) -> bool {
        self.tags.insert(tag)
    }

    pub fn remove_tag(&mut self, tag: &TagName) -> bool {
        self.tags.remove(tag)
    }

    pub fn has_tag(&self, tag: &TagName) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_all_tags(&self, tags: &[TagName]) -> bool {
        tags.iter().all(|tag| self.tags.contains(tag))
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.text.to_lowercase().contains(&word.to_lowercase())
    }
}

pub fn normalize_note_text(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyNoteText);
    }
    Ok(trimmed.to_string())
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = self.tags.iter().map(TagName::hashtag).collect();
        write!(f, "Tags: {}\nNote: {}", tags.join(", "), self.text)
    }
}
