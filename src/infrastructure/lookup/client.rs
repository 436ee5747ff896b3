use super::{rate_limiter::RateLimiter, retry::RetryPolicy};
use crate::{
    domain::{geo::GeoPoint, route::entity::RouteSummary},
    infrastructure::geocoding::{GeocodingProvider, ProviderError, RoutingProvider},
};
use std::{future::Future, sync::Arc, time::Duration};

/// Throttling, timeout and retry settings for [`LookupClient`].
#[derive(Debug, Clone, Copy)]
pub struct LookupSettings {
    pub geocode_interval: Duration,
    pub autocomplete_interval: Duration,
    pub routing_interval: Duration,
    pub call_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            geocode_interval: Duration::from_millis(1000),
            autocomplete_interval: Duration::from_millis(200),
            routing_interval: Duration::from_millis(750),
            call_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// The single gateway to the geocoding and routing providers.
///
/// One instance is shared by every request in the process so that all calls
/// draw from the same throttle gates.
pub struct LookupClient {
    geocoder: Arc<dyn GeocodingProvider>,
    router: Arc<dyn RoutingProvider>,
    geocode_gate: RateLimiter,
    autocomplete_gate: RateLimiter,
    routing_gate: RateLimiter,
    retry: RetryPolicy,
    call_timeout: Duration,
}

impl LookupClient {
    pub fn new(
        geocoder: Arc<dyn GeocodingProvider>,
        router: Arc<dyn RoutingProvider>,
        settings: LookupSettings,
    ) -> Self {
        Self {
            geocoder,
            router,
            geocode_gate: RateLimiter::new("geocode", settings.geocode_interval),
            autocomplete_gate: RateLimiter::new("autocomplete", settings.autocomplete_interval),
            routing_gate: RateLimiter::new("routing", settings.routing_interval),
            retry: settings.retry,
            call_timeout: settings.call_timeout,
        }
    }

    /// Coordinates of the best match for `address`.
    ///
    /// `ProviderError::NotFound` when the provider has no match; any other error
    /// means every attempt failed.
    pub async fn geocode(&self, address: &str) -> Result<GeoPoint, ProviderError> {
        self.retry
            .run("geocode", address, move |_| async move {
                self.geocode_gate.acquire().await;
                let matches = self.timed(self.geocoder.search(address)).await?;
                matches
                    .into_iter()
                    .next()
                    .map(|m| m.point)
                    .ok_or_else(|| ProviderError::NotFound(format!("no match for '{}'", address)))
            })
            .await
    }

    /// Driving distance and duration. `subject` names the destination in logs.
    pub async fn route(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        subject: &str,
    ) -> Result<RouteSummary, ProviderError> {
        self.retry
            .run("route", subject, move |_| async move {
                self.routing_gate.acquire().await;
                self.timed(self.router.directions(from, to)).await
            })
            .await
    }

    /// Address completions. Interactive, so a single attempt.
    pub async fn autocomplete(&self, text: &str, limit: usize) -> Result<Vec<String>, ProviderError> {
        self.autocomplete_gate.acquire().await;
        self.timed(self.geocoder.autocomplete(text, limit)).await
    }

    async fn timed<T>(
        &self,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| ProviderError::Timeout)?
    }
}
