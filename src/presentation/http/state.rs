use crate::{
    application::{
        autocomplete::{dto::SuggestSettings, use_case::SuggestUseCase},
        find_closest::{dto::SearchSettings, use_case::FindClosestUseCase},
    },
    domain::location::repository::LocationRepository,
    infrastructure::{cache::SuggestionCache, lookup::LookupClient},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub locations: Arc<dyn LocationRepository>,
    pub find_closest: Arc<FindClosestUseCase>,
    pub suggest: Arc<SuggestUseCase>,
}

impl AppState {
    /// Wire the use cases around one shared lookup client.
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        lookup: Arc<LookupClient>,
        search: SearchSettings,
        suggest: SuggestSettings,
    ) -> Self {
        let cache = Arc::new(SuggestionCache::new(suggest.cache_ttl));
        Self {
            find_closest: Arc::new(FindClosestUseCase::new(
                lookup.clone(),
                locations.clone(),
                search,
            )),
            suggest: Arc::new(SuggestUseCase::new(
                lookup,
                cache,
                suggest.min_chars,
                suggest.limit,
            )),
            locations,
        }
    }
}
