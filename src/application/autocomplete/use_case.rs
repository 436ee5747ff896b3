use crate::{
    domain::location::value_objects::SuggestText,
    infrastructure::{cache::SuggestionCache, lookup::LookupClient},
};
use std::sync::Arc;

/// Address suggestions for a typed prefix. Never fails: anything that goes
/// wrong yields an empty list.
pub struct SuggestUseCase {
    lookup: Arc<LookupClient>,
    cache: Arc<SuggestionCache>,
    min_chars: usize,
    limit: usize,
}

impl SuggestUseCase {
    pub fn new(
        lookup: Arc<LookupClient>,
        cache: Arc<SuggestionCache>,
        min_chars: usize,
        limit: usize,
    ) -> Self {
        Self {
            lookup,
            cache,
            min_chars,
            limit,
        }
    }

    pub async fn execute(&self, prefix: &str) -> Vec<String> {
        let Some(text) = SuggestText::new(prefix, self.min_chars) else {
            return Vec::new();
        };

        let fetched = self
            .cache
            .get_or_fetch(&text.cache_key(), || {
                self.lookup.autocomplete(text.as_str(), self.limit)
            })
            .await;

        match fetched {
            Ok(suggestions) => suggestions,
            Err(err) => {
                tracing::warn!(query = text.as_str(), error = %err, "Autocomplete failed");
                Vec::new()
            }
        }
    }
}
