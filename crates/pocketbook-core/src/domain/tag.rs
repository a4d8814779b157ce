use crate::domain::field::field_type;
use crate::error::CoreError;

field_type!(
    /// Case-sensitive note label, stored without its leading `#`.
    TagName,
    normalize_tag_name
);

impl TagName {
    pub fn hashtag(&self) -> String {
        format!("#{}", self.as_str())
    }
}

pub fn normalize_tag_name(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if stripped.is_empty()
        || stripped
            .chars()
            .any(|ch| ch.is_whitespace() || matches!(ch, ';' | ',' | '#'))
    {
        return Err(CoreError::InvalidTag(raw.to_string()));
    }
    Ok(stripped.to_string())
}
