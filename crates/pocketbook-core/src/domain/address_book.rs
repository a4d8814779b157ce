use crate::domain::phone::strip_phone_separators;
use crate::domain::{normalize_phone, Name, Record};
use crate::error::CoreError;
use chrono::NaiveDate;
use std::str::FromStr;

/// A named predicate for [`AddressBook::search_records`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Name(String),
    Phone(String),
}

impl Criterion {
    fn matches(&self, record: &Record) -> bool {
        match self {
            Criterion::Name(value) => {
                record.name().as_str().to_lowercase() == value.to_lowercase()
            }
            Criterion::Phone(value) => {
                let query = normalize_phone(value).unwrap_or_else(|_| value.to_lowercase());
                record
                    .phones()
                    .iter()
                    .any(|phone| phone.as_str().to_lowercase() == query)
            }
        }
    }
}

impl FromStr for Criterion {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (field, value) = raw
            .split_once('=')
            .ok_or_else(|| CoreError::InvalidCriterion(raw.to_string()))?;
        let value = value.trim().to_string();
        match field.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Criterion::Name(value)),
            "phone" => Ok(Criterion::Phone(value)),
            other => Err(CoreError::UnknownSearchField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday<'a> {
    pub record: &'a Record,
    pub days: i64,
}

/// Contacts keyed by name, kept in insertion order for stable paging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: Vec<Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.position(name).map(|index| &self.records[index])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.position(name).map(|index| &mut self.records[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Inserts `record`, replacing an entry with the same name in place.
    pub fn add_record(&mut self, record: Record) -> Option<Record> {
        match self.position(record.name().as_str()) {
            Some(index) => Some(std::mem::replace(&mut self.records[index], record)),
            None => {
                self.records.push(record);
                None
            }
        }
    }

    pub fn delete_record(&mut self, name: &str) -> Result<Record, CoreError> {
        let index = self
            .position(name)
            .ok_or_else(|| CoreError::ContactNotFound(name.to_string()))?;
        Ok(self.records.remove(index))
    }

    /// Replaces the entry stored under `name`, re-keying it when the new
    /// record carries a different name.
    pub fn replace_record(&mut self, name: &str, record: Record) -> Result<Record, CoreError> {
        let index = self
            .position(name)
            .ok_or_else(|| CoreError::ContactNotFound(name.to_string()))?;
        if let Some(other) = self.position(record.name().as_str()) {
            if other != index {
                return Err(CoreError::ContactExists(record.name().to_string()));
            }
        }
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    pub fn rename_record(&mut self, name: &str, new_name: Name) -> Result<(), CoreError> {
        let mut record = self
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::ContactNotFound(name.to_string()))?;
        record.rename(new_name);
        self.replace_record(name, record).map(|_| ())
    }

    /// Records satisfying every criterion; all records when `criteria` is empty.
    pub fn search_records(&self, criteria: &[Criterion]) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| criteria.iter().all(|criterion| criterion.matches(record)))
            .collect()
    }

    pub fn search_by_name(&self, query: &str) -> Vec<&Record> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.name().as_str().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn search_by_phone(&self, query: &str) -> Vec<&Record> {
        let needle = strip_phone_separators(query);
        self.records
            .iter()
            .filter(|record| {
                record
                    .phones()
                    .iter()
                    .any(|phone| phone.as_str().contains(&needle))
            })
            .collect()
    }

    /// Zero-based page of at most `page_size` records; empty past the end.
    pub fn page(&self, page_size: usize, page_index: usize) -> Result<&[Record], CoreError> {
        if page_size == 0 {
            return Err(CoreError::InvalidPageSize(page_size));
        }
        let len = self.records.len();
        let start = page_index.saturating_mul(page_size).min(len);
        let end = start.saturating_add(page_size).min(len);
        Ok(&self.records[start..end])
    }

    pub fn page_count(&self, page_size: usize) -> Result<usize, CoreError> {
        if page_size == 0 {
            return Err(CoreError::InvalidPageSize(page_size));
        }
        Ok(self.records.len().div_ceil(page_size))
    }

    pub fn upcoming_birthdays(
        &self,
        today: NaiveDate,
        within_days: i64,
    ) -> Vec<UpcomingBirthday<'_>> {
        let mut upcoming: Vec<UpcomingBirthday<'_>> = self
            .records
            .iter()
            .filter_map(|record| {
                let days = record.days_to_birthday(today)?;
                (days <= within_days).then_some(UpcomingBirthday { record, days })
            })
            .collect();
        upcoming.sort_by(|a, b| {
            a.days
                .cmp(&b.days)
                .then_with(|| a.record.name().cmp(b.record.name()))
        });
        upcoming
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.name().as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressBook, Criterion};
    use crate::domain::{Birthday, Name, Phone, Record};
    use crate::error::CoreError;
    use chrono::NaiveDate;

    fn record(name: &str, phones: &[&str]) -> Record {
        phones.iter().fold(Record::new(Name::new(name).unwrap()), |record, raw| {
            record.with_phone(Phone::new(raw).unwrap())
        })
    }

    fn names<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<&'a str> {
        records.into_iter().map(|r| r.name().as_str()).collect()
    }

    #[test]
    fn add_record_overwrites_in_place() {
        let mut book = AddressBook::new();
        book.add_record(record("Alice", &["0501111111"]));
        book.add_record(record("Bob", &[]));
        let replaced = book.add_record(record("Alice", &["0502222222"]));
        assert!(replaced.is_some());
        assert_eq!(names(book.iter()), vec!["Alice", "Bob"]);
        assert_eq!(
            book.get("Alice").unwrap().phones()[0].as_str(),
            "+380502222222"
        );
    }

    #[test]
    fn delete_record_requires_exact_key() {
        let mut book = AddressBook::new();
        book.add_record(record("Alice", &[]));
        assert_eq!(
            book.delete_record("alice").unwrap_err(),
            CoreError::ContactNotFound("alice".to_string())
        );
        assert!(book.delete_record("Alice").is_ok());
        assert!(book.is_empty());
    }

    #[test]
    fn replace_record_rekeys_and_guards_collisions() {
        let mut book = AddressBook::new();
        book.add_record(record("Alice", &[]));
        book.add_record(record("Bob", &[]));

        let err = book
            .replace_record("Alice", record("Bob", &[]))
            .unwrap_err();
        assert!(matches!(err, CoreError::ContactExists(_)));

        book.rename_record("Alice", Name::new("Alicia").unwrap())
            .unwrap();
        assert_eq!(names(book.iter()), vec!["Alicia", "Bob"]);
        assert!(book.get("Alice").is_none());
    }

    #[test]
    fn search_records_ands_criteria() {
        let mut book = AddressBook::new();
        book.add_record(record("Alice", &["0501111111"]));
        book.add_record(record("Bob", &["0501111111", "0502222222"]));

        let by_phone = book.search_records(&[Criterion::Phone("050 111 11 11".into())]);
        assert_eq!(names(by_phone), vec!["Alice", "Bob"]);

        let both = book.search_records(&[
            Criterion::Name("BOB".into()),
            Criterion::Phone("+380501111111".into()),
        ]);
        assert_eq!(names(both), vec!["Bob"]);

        let none = book.search_records(&[
            Criterion::Name("alice".into()),
            Criterion::Phone("0502222222".into()),
        ]);
        assert!(none.is_empty());

        assert_eq!(book.search_records(&[]).len(), 2);
    }

    #[test]
    fn criterion_parses_field_value_pairs() {
        assert_eq!(
            "name=Alice".parse::<Criterion>().unwrap(),
            Criterion::Name("Alice".into())
        );
        assert_eq!(
            "Phone = 0501111111".parse::<Criterion>().unwrap(),
            Criterion::Phone("0501111111".into())
        );
        assert!(matches!(
            "email=a@b.cd".parse::<Criterion>(),
            Err(CoreError::UnknownSearchField(_))
        ));
        assert!(matches!(
            "alice".parse::<Criterion>(),
            Err(CoreError::InvalidCriterion(_))
        ));
    }

    #[test]
    fn substring_searches() {
        let mut book = AddressBook::new();
        book.add_record(record("Alice", &["0501234567"]));
        book.add_record(record("Malik", &["0677654321"]));
        book.add_record(record("Bob", &[]));

        assert_eq!(names(book.search_by_name("ALI")), vec!["Alice", "Malik"]);
        assert_eq!(names(book.search_by_phone("123-45")), vec!["Alice"]);
        assert_eq!(names(book.search_by_phone("+380")), vec!["Alice", "Malik"]);
        assert!(book.search_by_name("zed").is_empty());
    }

    #[test]
    fn pages_are_clamped() {
        let mut book = AddressBook::new();
        for i in 0..12 {
            book.add_record(record(&format!("Contact {i:02}"), &[]));
        }
        assert_eq!(book.page(5, 0).unwrap().len(), 5);
        assert_eq!(book.page(5, 1).unwrap()[0].name().as_str(), "Contact 05");
        assert_eq!(book.page(5, 2).unwrap().len(), 2);
        assert!(book.page(5, 3).unwrap().is_empty());
        assert!(book.page(5, usize::MAX).unwrap().is_empty());
        assert_eq!(book.page_count(5).unwrap(), 3);
        assert_eq!(book.page(0, 0).unwrap_err(), CoreError::InvalidPageSize(0));
    }

    #[test]
    fn upcoming_birthdays_sorted_by_distance() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let mut book = AddressBook::new();
        book.add_record(
            record("Carol", &[]).with_birthday(Birthday::new("25.05.1980").unwrap()),
        );
        book.add_record(
            record("Alice", &[]).with_birthday(Birthday::new("20.05.1990").unwrap()),
        );
        book.add_record(
            record("Bob", &[]).with_birthday(Birthday::new("01.12.1990").unwrap()),
        );
        book.add_record(record("Dave", &[]));

        let upcoming = book.upcoming_birthdays(today, 7);
        let summary: Vec<(&str, i64)> = upcoming
            .iter()
            .map(|item| (item.record.name().as_str(), item.days))
            .collect();
        assert_eq!(summary, vec![("Alice", 0), ("Carol", 5)]);
    }
}
