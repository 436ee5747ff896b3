pub mod batch;
pub mod csv_repository;

pub use csv_repository::{CsvLocationRepository, LocationLoadError};
