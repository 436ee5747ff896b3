use super::errors::ProviderError;
use crate::domain::{geo::GeoPoint, route::entity::RouteSummary};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub label: String,
    pub point: GeoPoint,
}

#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Forward geocode free text. An empty list means no match.
    async fn search(&self, text: &str) -> Result<Vec<GeocodeMatch>, ProviderError>;

    /// Address labels completing `text`, at most `limit` of them.
    async fn autocomplete(&self, text: &str, limit: usize) -> Result<Vec<String>, ProviderError>;
}

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Driving directions from `from` to `to`. `ProviderError::NotFound` when no route exists.
    async fn directions(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteSummary, ProviderError>;
}
