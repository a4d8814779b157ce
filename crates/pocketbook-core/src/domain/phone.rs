use crate::domain::field::field_type;
use crate::error::CoreError;

const SEPARATORS: [char; 4] = ['(', ')', '-', ' '];
const COUNTRY_CODE: &str = "380";
const CANONICAL_LEN: usize = 13;

field_type!(
    /// Phone number in canonical `+380XXXXXXXXX` form.
    Phone,
    normalize_phone
);

/// Rewrites a loosely formatted Ukrainian number into `+380XXXXXXXXX`.
///
/// Accepted shapes once separators are gone: `+380XXXXXXXXX`,
/// `380XXXXXXXXX`, `80XXXXXXXXX` and the national `0XXXXXXXXX`.
pub fn normalize_phone(raw: &str) -> Result<String, CoreError> {
    let compact = strip_phone_separators(raw);
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CoreError::InvalidPhone(raw.trim().to_string()));
    }

    let canonical = if compact.starts_with('+') {
        if compact.len() == CANONICAL_LEN && digits.starts_with(COUNTRY_CODE) {
            compact.clone()
        } else {
            return Err(CoreError::InvalidPhone(raw.trim().to_string()));
        }
    } else {
        match digits.len() {
            12 if digits.starts_with(COUNTRY_CODE) => format!("+{digits}"),
            11 if digits.starts_with("80") => format!("+3{digits}"),
            10 if digits.starts_with('0') => format!("+38{digits}"),
            _ => return Err(CoreError::InvalidPhone(raw.trim().to_string())),
        }
    };

    Ok(canonical)
}

pub fn strip_phone_separators(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| !SEPARATORS.contains(ch))
        .collect()
}
