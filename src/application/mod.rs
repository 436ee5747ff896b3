pub mod autocomplete;
pub mod find_closest;
