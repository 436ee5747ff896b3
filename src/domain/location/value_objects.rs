use crate::domain::shared::errors::DomainError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref HAS_ALPHANUMERIC: regex::Regex = regex::Regex::new(r"[\p{L}\p{N}]").unwrap();
    static ref WHITESPACE_RUN: regex::Regex = regex::Regex::new(r"\s+").unwrap();
}

/// Free-text address submitted for geocoding, in any script.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Address {
    #[validate(length(min = 1, max = 512), regex(path = *HAS_ALPHANUMERIC))]
    pub value: String,
}

impl Address {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let address = Self {
            value: value.trim().to_string(),
        };
        if address.value.is_empty() {
            return Err(DomainError::InvalidInput("Address is required".into()));
        }
        address.validate().map_err(|e| {
            let too_long = e
                .field_errors()
                .get("value")
                .is_some_and(|errs| errs.iter().any(|err| err.code == "length"));
            let message = if too_long {
                "Address must be at most 512 characters".to_string()
            } else {
                "Address must contain letters or digits".to_string()
            };
            DomainError::InvalidInput(message)
        })?;
        Ok(address)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Autocomplete prefix, normalized for cache lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct SuggestText {
    #[validate(length(max = 256))]
    pub value: String,
}

impl SuggestText {
    /// Returns `None` when the trimmed text is shorter than `min_chars`.
    pub fn new(value: &str, min_chars: usize) -> Option<Self> {
        let collapsed = WHITESPACE_RUN.replace_all(value.trim(), " ").to_string();
        if collapsed.chars().count() < min_chars.max(1) {
            return None;
        }
        let text = Self { value: collapsed };
        text.validate().ok()?;
        Some(text)
    }

    /// Lowercase form used as the cache key.
    pub fn cache_key(&self) -> String {
        self.value.to_lowercase()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}
