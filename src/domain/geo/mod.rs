pub mod point;

pub use point::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
