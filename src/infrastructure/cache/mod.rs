pub mod suggestion_cache;

pub use suggestion_cache::SuggestionCache;
