use super::{
    errors::ProviderError,
    traits::{GeocodeMatch, GeocodingProvider, RoutingProvider},
    types::{DirectionsRequest, DirectionsResponse, GeoResponse, OrsErrorBody, OrsErrorPayload},
};
use crate::domain::{geo::GeoPoint, route::entity::RouteSummary};
use async_trait::async_trait;
use reqwest::{StatusCode, header::AUTHORIZATION};
use std::time::Duration;

pub const DEFAULT_ORS_BASE_URL: &str = "https://api.openrouteservice.org";

/// ORS error codes meaning "no route" or "point not on the road network".
const ORS_ROUTE_NOT_FOUND: u32 = 2009;
const ORS_POINT_NOT_FOUND: u32 = 2010;

/// HTTP client for the OpenRouteService geocoding and directions APIs.
///
/// The client performs exactly one request per call. Throttling and retries
/// belong to [`crate::infrastructure::lookup::LookupClient`].
pub struct OrsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    country: Option<String>,
}

impl OrsClient {
    pub fn new(
        base_url: &str,
        api_key: String,
        country: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("drive-time-locator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            country: country.filter(|c| !c.trim().is_empty()),
        })
    }

    async fn geocode_request(
        &self,
        endpoint: &str,
        text: &str,
        size: usize,
    ) -> Result<GeoResponse, ProviderError> {
        let url = format!("{}/geocode/{}", self.base_url, endpoint);
        let query = self.geocode_query(text, size);

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(error_from_status(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl OrsClient {
    /// Query pairs for the Pelias-style geocode endpoints. The country filter
    /// is only sent when one is configured.
    fn geocode_query(&self, text: &str, size: usize) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("api_key", self.api_key.clone()),
            ("text", text.to_string()),
            ("size", size.to_string()),
        ];
        if let Some(country) = &self.country {
            query.push(("boundary.country", country.clone()));
        }
        query
    }
}

#[async_trait]
impl GeocodingProvider for OrsClient {
    async fn search(&self, text: &str) -> Result<Vec<GeocodeMatch>, ProviderError> {
        tracing::debug!(text, "ORS geocode search");
        let response = self.geocode_request("search", text, 1).await?;
        parse_matches(response)
    }

    async fn autocomplete(&self, text: &str, limit: usize) -> Result<Vec<String>, ProviderError> {
        tracing::debug!(text, limit, "ORS geocode autocomplete");
        let response = self.geocode_request("autocomplete", text, limit).await?;
        Ok(parse_labels(response, limit))
    }
}

#[async_trait]
impl RoutingProvider for OrsClient {
    async fn directions(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteSummary, ProviderError> {
        let url = format!("{}/v2/directions/driving-car", self.base_url);
        let body = DirectionsRequest {
            coordinates: [[from.longitude, from.latitude], [to.longitude, to.latitude]],
        };
        tracing::debug!(?from, ?to, "ORS directions");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, &self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(error_from_status(status, &text));
        }
        parse_directions(&text)
    }
}

fn parse_matches(response: GeoResponse) -> Result<Vec<GeocodeMatch>, ProviderError> {
    response
        .features
        .into_iter()
        .map(|feature| {
            let coords = feature
                .geometry
                .map(|g| g.coordinates)
                .unwrap_or_default();
            let &[lon, lat] = coords.as_slice() else {
                return Err(ProviderError::Malformed(format!(
                    "expected [lon, lat], got {:?}",
                    coords
                )));
            };
            let point = GeoPoint::new(lat, lon)
                .map_err(|e| ProviderError::Malformed(e.to_string()))?;
            Ok(GeocodeMatch {
                label: feature.properties.label.unwrap_or_default(),
                point,
            })
        })
        .collect()
}

fn parse_labels(response: GeoResponse, limit: usize) -> Vec<String> {
    response
        .features
        .into_iter()
        .filter_map(|f| f.properties.label)
        .filter(|label| !label.trim().is_empty())
        .take(limit)
        .collect()
}

fn parse_directions(body: &str) -> Result<RouteSummary, ProviderError> {
    let response: DirectionsResponse = serde_json::from_str(body)?;
    let summary = response
        .routes
        .first()
        .ok_or_else(|| ProviderError::NotFound("no route in directions response".into()))?
        .summary;

    Ok(RouteSummary {
        distance_km: summary.distance / 1000.0,
        duration_minutes: summary.duration / 60.0,
    })
}

fn error_from_status(status: StatusCode, body: &str) -> ProviderError {
    let detail = serde_json::from_str::<OrsErrorPayload>(body).ok();
    let code = match &detail {
        Some(OrsErrorPayload {
            error: OrsErrorBody::Detail { code, .. },
        }) => Some(*code),
        _ => None,
    };
    let message = match detail {
        Some(OrsErrorPayload {
            error: OrsErrorBody::Detail { message, .. } | OrsErrorBody::Message(message),
        }) => message,
        None => body.chars().take(200).collect(),
    };

    if status == StatusCode::NOT_FOUND
        || matches!(code, Some(ORS_ROUTE_NOT_FOUND | ORS_POINT_NOT_FOUND))
    {
        ProviderError::NotFound(message)
    } else {
        ProviderError::Service(format!("HTTP {}: {}", status.as_u16(), message))
    }
}
