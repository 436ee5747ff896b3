use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Autocomplete behaviour: minimum prefix length, suggestions per query and
/// how long answers are cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestSettings {
    pub min_chars: usize,
    pub limit: usize,
    pub cache_ttl: Duration,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            min_chars: 2,
            limit: 5,
            cache_ttl: Duration::from_secs(3600),
        }
    }
}
