use super::entity::RouteResult;

/// Orders results by drive time (shortest first, ties by distance) and keeps the
/// first `top_k`.
pub fn rank(mut results: Vec<RouteResult>, top_k: usize) -> Vec<RouteResult> {
    results.sort_by(|a, b| {
        a.duration_minutes
            .total_cmp(&b.duration_minutes)
            .then(a.distance_km.total_cmp(&b.distance_km))
    });
    results.truncate(top_k);
    results
}
