//! Topic validation and complexity levels

use crate::SourceError;

/// Longest topic accepted, in characters
pub const MAX_TOPIC_LEN: usize = 500;

/// Detail level of a coloring page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Complexity {
    /// Few large shapes
    #[default]
    Little,
    Big,
    /// Many small regions
    Expert,
}

impl Complexity {
    /// Read a free-text complexity description
    ///
    /// "intricate" or "complex" mean expert, "moderate" means big, anything
    /// else is little.
    pub fn from_phrase(phrase: &str) -> Self {
        let phrase = phrase.to_lowercase();
        if phrase.contains("intricate") || phrase.contains("complex") {
            Complexity::Expert
        } else if phrase.contains("moderate") {
            Complexity::Big
        } else {
            Complexity::Little
        }
    }

    /// Suffix used in preset asset names
    pub fn asset_suffix(self) -> &'static str {
        match self {
            Complexity::Little => "little",
            Complexity::Big => "big",
            Complexity::Expert => "expert",
        }
    }
}

/// Trim a topic and check it is usable. Returns the trimmed topic.
pub fn validate_topic(topic: &str) -> Result<&str, SourceError> {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        return Err(SourceError::Validation("Prompt cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_TOPIC_LEN {
        return Err(SourceError::Validation(format!(
            "Prompt must be {} characters or less",
            MAX_TOPIC_LEN
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_from_phrase() {
        assert_eq!(Complexity::from_phrase("Intricate details"), Complexity::Expert);
        assert_eq!(Complexity::from_phrase("complex"), Complexity::Expert);
        assert_eq!(Complexity::from_phrase("moderate"), Complexity::Big);
        assert_eq!(Complexity::from_phrase("simple"), Complexity::Little);
        assert_eq!(Complexity::from_phrase(""), Complexity::Little);
    }

    #[test]
    fn test_validate_topic() {
        assert_eq!(validate_topic("  a happy whale \n").unwrap(), "a happy whale");
        assert!(matches!(validate_topic("   "), Err(SourceError::Validation(_))));

        let long = "x".repeat(MAX_TOPIC_LEN + 1);
        assert!(matches!(validate_topic(&long), Err(SourceError::Validation(_))));
        let limit = "é".repeat(MAX_TOPIC_LEN);
        assert!(validate_topic(&limit).is_ok());
    }
}
