pub mod cache;
pub mod geocoding;
pub mod locations;
pub mod lookup;
