use crate::domain::{Address, Birthday, Email, Name, Phone};
use crate::error::CoreError;
use chrono::NaiveDate;
use std::fmt;

/// One contact: a name, its phones and the optional details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
    address: Option<Address>,
    email: Option<Email>,
}

impl Record {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phones: Vec::new(),
            birthday: None,
            address: None,
            email: None,
        }
    }

    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.add_phone(phone);
        self
    }

    pub fn with_birthday(mut self, birthday: Birthday) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn has_phone(&self, phone: &Phone) -> bool {
        self.phones.contains(phone)
    }

    /// Appends `phone` unless the record already has it.
    pub fn add_phone(&mut self, phone: Phone) -> bool {
        if self.has_phone(&phone) {
            return false;
        }
        self.phones.push(phone);
        true
    }

    pub fn delete_phone(&mut self, phone: &Phone) -> Result<Phone, CoreError> {
        let index = self
            .phones
            .iter()
            .position(|existing| existing == phone)
            .ok_or_else(|| self.phone_not_found(phone))?;
        Ok(self.phones.remove(index))
    }

    pub fn edit_phone(&mut self, old: &Phone, new: Phone) -> Result<(), CoreError> {
        let index = self
            .phones
            .iter()
            .position(|existing| existing == old)
            .ok_or_else(|| self.phone_not_found(old))?;
        if &new != old && self.has_phone(&new) {
            return Err(CoreError::DuplicatePhone {
                name: self.name.to_string(),
                phone: new.to_string(),
            });
        }
        self.phones[index] = new;
        Ok(())
    }

    /// Sets the single birthday, returning the one it replaced.
    pub fn set_birthday(&mut self, birthday: Birthday) -> Option<Birthday> {
        self.birthday.replace(birthday)
    }

    pub fn clear_birthday(&mut self) -> Option<Birthday> {
        self.birthday.take()
    }

    pub fn set_address(&mut self, address: Option<Address>) -> Option<Address> {
        std::mem::replace(&mut self.address, address)
    }

    pub fn set_email(&mut self, email: Option<Email>) -> Option<Email> {
        std::mem::replace(&mut self.email, email)
    }

    pub(crate) fn rename(&mut self, name: Name) {
        self.name = name;
    }

    pub fn days_to_birthday(&self, today: NaiveDate) -> Option<i64> {
        self.birthday.as_ref().map(|birthday| birthday.days_until(today))
    }

    fn phone_not_found(&self, phone: &Phone) -> CoreError {
        CoreError::PhoneNotFound {
            name: self.name.to_string(),
            phone: phone.to_string(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones: Vec<&str> = self.phones.iter().map(Phone::as_str).collect();
        write!(f, "Name: {}, Phones: {}", self.name, phones.join(", "))?;
        if let Some(birthday) = &self.birthday {
            write!(f, ", Birthday: {}", birthday)?;
        }
        if let Some(email) = &self.email {
            write!(f, ", Email: {}", email)?;
        }
        if let Some(address) = &self.address {
            write!(f, ", Address: {}", address)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use crate::domain::{Birthday, Name, Phone};
    use crate::error::CoreError;
    use chrono::NaiveDate;

    fn alice() -> Record {
        Record::new(Name::new("Alice").unwrap())
    }

    fn phone(raw: &str) -> Phone {
        Phone::new(raw).unwrap()
    }

    #[test]
    fn add_phone_skips_duplicates_across_shapes() {
        let mut record = alice();
        assert!(record.add_phone(phone("0501234567")));
        assert!(!record.add_phone(phone("+38 050 123 45 67")));
        assert_eq!(record.phones().len(), 1);
        assert_eq!(record.phones()[0].as_str(), "+380501234567");
    }

    #[test]
    fn delete_phone_reports_missing() {
        let mut record = alice().with_phone(phone("0501234567"));
        let err = record.delete_phone(&phone("0671234567")).unwrap_err();
        assert!(matches!(err, CoreError::PhoneNotFound { .. }));
        assert_eq!(record.phones().len(), 1);

        let removed = record.delete_phone(&phone("380501234567")).unwrap();
        assert_eq!(removed.as_str(), "+380501234567");
        assert!(record.phones().is_empty());
    }

    #[test]
    fn edit_phone_finds_entries_past_the_first() {
        let mut record = alice()
            .with_phone(phone("0501111111"))
            .with_phone(phone("0502222222"));
        record
            .edit_phone(&phone("0502222222"), phone("0503333333"))
            .unwrap();
        let values: Vec<&str> = record.phones().iter().map(Phone::as_str).collect();
        assert_eq!(values, vec!["+380501111111", "+380503333333"]);
    }

    #[test]
    fn edit_phone_refuses_to_duplicate() {
        let mut record = alice()
            .with_phone(phone("0501111111"))
            .with_phone(phone("0502222222"));
        let err = record
            .edit_phone(&phone("0501111111"), phone("0502222222"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicatePhone { .. }));
        assert!(record
            .edit_phone(&phone("0501111111"), phone("0501111111"))
            .is_ok());
    }

    #[test]
    fn set_birthday_overwrites_in_place() {
        let mut record = alice();
        assert!(record
            .set_birthday(Birthday::new("01.01.1990").unwrap())
            .is_none());
        let previous = record.set_birthday(Birthday::new("02.02.1992").unwrap());
        assert_eq!(previous.unwrap().as_str(), "01.01.1990");
        assert_eq!(record.birthday().unwrap().as_str(), "02.02.1992");
    }

    #[test]
    fn days_to_birthday_counts_forward() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let record = alice();
        assert_eq!(record.days_to_birthday(today), None);

        let record = alice().with_birthday(Birthday::new("20.05.1990").unwrap());
        assert_eq!(record.days_to_birthday(today), Some(0));
        let record = alice().with_birthday(Birthday::new("21.05.1990").unwrap());
        assert_eq!(record.days_to_birthday(today), Some(1));
        let record = alice().with_birthday(Birthday::new("19.05.1990").unwrap());
        assert_eq!(record.days_to_birthday(today), Some(364));
    }

    #[test]
    fn display_lists_phones() {
        let record = alice()
            .with_phone(phone("0501111111"))
            .with_phone(phone("0502222222"));
        assert_eq!(
            record.to_string(),
            "Name: Alice, Phones: +380501111111, +380502222222"
        );
    }
}
