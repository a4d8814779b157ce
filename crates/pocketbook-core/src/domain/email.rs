use crate::domain::field::field_type;
use crate::error::CoreError;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_.+-]{2,}@(?:[a-z0-9-]{2,}\.)?[a-z0-9-]{2,}\.[a-z0-9]{2,}$")
        .unwrap_or_else(|err| panic!("email pattern is valid: {err}"))
});

field_type!(Email, normalize_email);

pub fn normalize_email(value: &str) -> Result<String, CoreError> {
    let normalized = value.trim().to_ascii_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(CoreError::InvalidEmail(value.trim().to_string()));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::{normalize_email, Email};

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  Ada@Example.com ");
        assert_eq!(value.as_deref(), Ok("ada@example.com"));
    }

    #[test]
    fn accepts_subdomain_branch() {
        let email = Email::new("user.name@sub.example.com").unwrap();
        assert_eq!(email.as_str(), "user.name@sub.example.com");
        assert!(Email::new("first+tag@mail.co.uk").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "bad@@x",
            "a@example.com",
            "ada@example",
            "ada@x.com",
            "ada@example.c",
            "ada example@example.com",
            "ada@a.b.c.example.com",
            "",
        ] {
            assert!(normalize_email(raw).is_err(), "{raw}");
        }
    }
}
