use super::dto::SearchSettings;
use crate::{
    domain::{
        geo::GeoPoint,
        location::{
            entity::Candidate, proximity::filter_candidates, repository::LocationRepository,
            value_objects::Address,
        },
        route::{entity::RouteResult, ranking::rank},
        shared::errors::DomainError,
    },
    infrastructure::{geocoding::ProviderError, lookup::LookupClient},
};
use futures_util::{StreamExt, stream};
use std::sync::Arc;

/// Geocode an address, pre-filter the location table by straight-line
/// distance, route to each candidate and return the nearest by drive time.
pub struct FindClosestUseCase {
    lookup: Arc<LookupClient>,
    locations: Arc<dyn LocationRepository>,
    settings: SearchSettings,
}

impl FindClosestUseCase {
    pub fn new(
        lookup: Arc<LookupClient>,
        locations: Arc<dyn LocationRepository>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            lookup,
            locations,
            settings,
        }
    }

    pub async fn execute(&self, address: &str) -> Result<Vec<RouteResult>, DomainError> {
        let address = Address::new(address)?;
        let origin = self.locate(&address).await?;

        let candidates = self.candidates(&origin);
        tracing::info!(
            address = address.as_str(),
            lat = origin.latitude,
            lon = origin.longitude,
            candidates = candidates.len(),
            "Address geocoded"
        );
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let results: Vec<RouteResult> = stream::iter(candidates)
            .map(|candidate| async move { self.resolve(origin, &candidate).await })
            .buffered(self.settings.routing_concurrency.max(1))
            .collect()
            .await;

        Ok(rank(results, self.settings.top_k))
    }

    /// The locations eligible for routing from `origin`.
    pub fn candidates(&self, origin: &GeoPoint) -> Vec<Candidate> {
        filter_candidates(
            origin,
            self.locations.all(),
            self.settings.max_candidates,
            self.settings.max_radius_km,
        )
    }

    async fn locate(&self, address: &Address) -> Result<GeoPoint, DomainError> {
        match self.lookup.geocode(address.as_str()).await {
            Ok(point) => Ok(point),
            Err(ProviderError::NotFound(_)) => {
                tracing::info!(address = address.as_str(), "Address could not be geocoded");
                Err(DomainError::AddressNotFound(address.as_str().to_string()))
            }
            Err(err) => Err(DomainError::UpstreamUnavailable(format!("geocoding failed: {}", err))),
        }
    }

    /// Routed result for one candidate, or the straight-line estimate when the
    /// router cannot answer.
    async fn resolve(&self, origin: GeoPoint, candidate: &Candidate) -> RouteResult {
        let name = candidate.location.name.as_str();
        match self.lookup.route(origin, candidate.location.point(), name).await {
            Ok(summary) => {
                tracing::debug!(
                    candidate = name,
                    approx_km = candidate.approx_distance_km,
                    route_km = summary.distance_km,
                    route_min = summary.duration_minutes,
                    "Route resolved"
                );
                RouteResult::routed(candidate, summary)
            }
            Err(err) => {
                tracing::warn!(
                    candidate = name,
                    approx_km = candidate.approx_distance_km,
                    error = %err,
                    "Routing failed, using straight-line estimate"
                );
                RouteResult::approximated(candidate, self.settings.assumed_speed_kmh)
            }
        }
    }
}
