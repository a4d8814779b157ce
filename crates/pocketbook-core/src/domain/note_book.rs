use crate::domain::ids::NoteId;
use crate::domain::{Note, TagName};
use crate::error::CoreError;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

/// How a caller points at a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLocator {
    Id(NoteId),
    Exact(String),
    Contains(String),
}

impl NoteLocator {
    fn matches(&self, note: &Note) -> bool {
        match self {
            NoteLocator::Id(id) => note.id() == *id,
            NoteLocator::Exact(text) => note.text() == text.trim(),
            NoteLocator::Contains(word) => note.contains_word(word),
        }
    }
}

impl fmt::Display for NoteLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteLocator::Id(id) => write!(f, "{id}"),
            NoteLocator::Exact(text) | NoteLocator::Contains(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteBook {
    notes: Vec<Note>,
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    /// Stores `note`, giving it a fresh id if its id is already taken.
    pub fn add_note(&mut self, mut note: Note) -> NoteId {
        while self.get(note.id()).is_some() {
            note.reassign_id();
        }
        let id = note.id();
        self.notes.push(note);
        id
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id() == id)
    }

    pub fn edit_note(&mut self, id: NoteId, text: &str) -> Result<(), CoreError> {
        self.require_mut(id)?.set_text(text)
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<Note, CoreError> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id() == id)
            .ok_or_else(|| CoreError::NoteNotFound(id.to_string()))?;
        Ok(self.notes.remove(index))
    }

    pub fn find_candidates(&self, locator: &NoteLocator) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| locator.matches(note))
            .collect()
    }

    /// The single note `locator` points at.
    pub fn resolve(&self, locator: &NoteLocator) -> Result<NoteId, CoreError> {
        match self.find_candidates(locator).as_slice() {
            [] => Err(CoreError::NoteNotFound(locator.to_string())),
            [note] => Ok(note.id()),
            candidates => Err(CoreError::AmbiguousNote {
                locator: locator.to_string(),
                count: candidates.len(),
            }),
        }
    }

    pub fn add_tag(&mut self, id: NoteId, tag: TagName) -> Result<bool, CoreError> {
        Ok(self.require_mut(id)?.add_tag(tag))
    }

    pub fn remove_tag(&mut self, id: NoteId, tag: &TagName) -> Result<bool, CoreError> {
        Ok(self.require_mut(id)?.remove_tag(tag))
    }

    pub fn add_tag_to_note(
        &mut self,
        locator: &NoteLocator,
        tag: TagName,
    ) -> Result<bool, CoreError> {
        let id = self.resolve(locator)?;
        self.add_tag(id, tag)
    }

    pub fn search_by_word(&self, word: &str) -> Vec<&Note> {
        self.find_candidates(&NoteLocator::Contains(word.to_string()))
    }

    pub fn search_by_tag(&self, tag: &TagName) -> Vec<&Note> {
        self.notes.iter().filter(|note| note.has_tag(tag)).collect()
    }

    pub fn search_by_tags(&self, tags: &[TagName]) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| note.has_all_tags(tags))
            .collect()
    }

    pub fn search_untagged(&self) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| note.tag_count() == 0)
            .collect()
    }

    /// Most-tagged notes first; ties keep their current order.
    pub fn sort_by_tag_count(&mut self) {
        self.notes.sort_by_key(|note| Reverse(note.tag_count()));
    }

    pub fn tag_counts(&self) -> Vec<(TagName, usize)> {
        let mut counts: BTreeMap<&TagName, usize> = BTreeMap::new();
        for tag in self.notes.iter().flat_map(|note| note.tags()) {
            *counts.entry(tag).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(tag, count)| (tag.clone(), count))
            .collect()
    }

    fn require_mut(&mut self, id: NoteId) -> Result<&mut Note, CoreError> {
        self.get_mut(id)
            .ok_or_else(|| CoreError::NoteNotFound(id.to_string()))
    }
}
