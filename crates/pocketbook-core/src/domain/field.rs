use crate::error::CoreError;

/// A scalar value that is validated whenever it is built or replaced.
pub trait Field: Sized {
    fn parse(raw: &str) -> Result<Self, CoreError>;

    /// The stored, already normalized value.
    fn value(&self) -> &str;

    /// Re-validates `raw` and swaps it in only on success.
    fn set(&mut self, raw: &str) -> Result<(), CoreError> {
        *self = Self::parse(raw)?;
        Ok(())
    }
}

/// Parses an optional input, treating blank input as absent.
pub fn parse_optional<F: Field>(raw: Option<&str>) -> Result<Option<F>, CoreError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => F::parse(value).map(Some),
        _ => Ok(None),
    }
}

macro_rules! field_type {
    ($(#[$meta:meta])* $name:ident, $normalize:path) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: &str) -> Result<Self, $crate::error::CoreError> {
                Ok(Self($normalize(raw)?))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl $crate::domain::field::Field for $name {
            fn parse(raw: &str) -> Result<Self, $crate::error::CoreError> {
                Self::new(raw)
            }

            fn value(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use field_type;

field_type!(
    /// Contact name; the key of a record inside an address book.
    Name,
    normalize_name
);

field_type!(Address, normalize_address);

pub fn normalize_name(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyName);
    }
    Ok(trimmed.to_string())
}

pub fn normalize_address(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyAddress);
    }
    Ok(trimmed.to_string())
}
