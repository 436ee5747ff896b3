use crate::domain::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// A point of interest from the location table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            latitude,
            longitude,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// A location kept by the proximity pre-filter, with its straight-line distance
/// to the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub location: Location,
    pub approx_distance_km: f64,
}
