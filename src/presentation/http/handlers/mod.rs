pub mod autocomplete;
pub mod health;
pub mod locator;
