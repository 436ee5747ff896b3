pub mod geo;
pub mod location;
pub mod route;
pub mod shared;
