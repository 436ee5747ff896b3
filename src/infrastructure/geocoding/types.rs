//! OpenRouteService response bodies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GeoResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude]`
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeatureProperties {
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DirectionsRequest {
    pub coordinates: [[f64; 2]; 2],
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub summary: DirectionsSummary,
}

/// ORS omits zero-valued fields, hence the defaults.
#[derive(Debug, Default, Deserialize, Clone, Copy)]
pub struct DirectionsSummary {
    /// meters
    #[serde(default)]
    pub distance: f64,
    /// seconds
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct OrsErrorPayload {
    pub error: OrsErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OrsErrorBody {
    Detail { code: u32, message: String },
    Message(String),
}
