use super::entity::{Candidate, Location};
use crate::domain::geo::{GeoPoint, haversine_km};

/// Narrows the location table to the `max_candidates` nearest locations that lie
/// within `max_radius_km` of `query`, nearest first.
///
/// Locations at equal distance keep their table order.
pub fn filter_candidates(
    query: &GeoPoint,
    locations: &[Location],
    max_candidates: usize,
    max_radius_km: f64,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = locations
        .iter()
        .map(|location| Candidate {
            approx_distance_km: haversine_km(query, &location.point()),
            location: location.clone(),
        })
        .filter(|c| c.approx_distance_km <= max_radius_km)
        .collect();

    // sort_by is stable
    candidates.sort_by(|a, b| a.approx_distance_km.total_cmp(&b.approx_distance_km));
    candidates.truncate(max_candidates);
    candidates
}
