use crate::domain::route::entity::{RouteResult, RouteSource};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FindClosestRequest {
    #[serde(default)]
    pub address: Option<String>,
}

/// One ranked location as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClosestLocation {
    pub name: String,
    pub phone: String,
    /// minutes, one decimal
    pub drive_time: f64,
    /// kilometers, two decimals
    pub distance_km: f64,
    pub source: RouteSource,
}

impl From<RouteResult> for ClosestLocation {
    fn from(result: RouteResult) -> Self {
        Self {
            name: result.name,
            phone: result.phone,
            drive_time: round_to(result.duration_minutes, 1),
            distance_km: round_to(result.distance_km, 2),
            source: result.source,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Tuning knobs of the closest-location search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    /// Locations kept by the straight-line pre-filter.
    pub max_candidates: usize,
    pub max_radius_km: f64,
    /// Results returned after ranking.
    pub top_k: usize,
    /// Speed used to turn a straight-line distance into a drive time.
    pub assumed_speed_kmh: f64,
    /// Router calls in flight per request.
    pub routing_concurrency: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            max_radius_km: 500.0,
            top_k: 5,
            assumed_speed_kmh: 80.0,
            routing_concurrency: 1,
        }
    }
}
