use crate::domain::location::entity::Candidate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Driving distance and duration between two points as reported by a router.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_minutes: f64,
}

/// Where a result's distance and duration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum RouteSource {
    Routed,
    Approximated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub name: String,
    pub phone: String,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub source: RouteSource,
}

impl RouteResult {
    pub fn routed(candidate: &Candidate, summary: RouteSummary) -> Self {
        Self {
            name: candidate.location.name.clone(),
            phone: candidate.location.phone.clone(),
            distance_km: summary.distance_km,
            duration_minutes: summary.duration_minutes,
            source: RouteSource::Routed,
        }
    }

    /// Estimate from the straight-line distance at `assumed_speed_kmh`.
    pub fn approximated(candidate: &Candidate, assumed_speed_kmh: f64) -> Self {
        let distance_km = candidate.approx_distance_km;
        Self {
            name: candidate.location.name.clone(),
            phone: candidate.location.phone.clone(),
            distance_km,
            duration_minutes: distance_km / assumed_speed_kmh * 60.0,
            source: RouteSource::Approximated,
        }
    }
}
