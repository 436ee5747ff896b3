pub mod errors;
pub mod ors_client;
pub mod traits;
pub mod types;

pub use errors::ProviderError;
pub use ors_client::OrsClient;
pub use traits::{GeocodeMatch, GeocodingProvider, RoutingProvider};
