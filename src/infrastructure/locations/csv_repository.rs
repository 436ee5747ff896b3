use crate::domain::{
    geo::GeoPoint,
    location::{entity::Location, repository::LocationRepository},
};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::{fs::File, io::Read, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationLoadError {
    #[error("Failed to open location file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read location table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Location table read once from a CSV export and kept in memory.
///
/// Required columns are `Name`, `Latitude` and `Longitude`; `Phone` is optional.
/// Header names are matched case-insensitively.
pub struct CsvLocationRepository {
    locations: Vec<Location>,
}

struct Columns {
    name: usize,
    latitude: usize,
    longitude: usize,
    phone: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, LocationLoadError> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        };
        Ok(Self {
            name: find("Name").ok_or(LocationLoadError::MissingColumn("Name"))?,
            latitude: find("Latitude").ok_or(LocationLoadError::MissingColumn("Latitude"))?,
            longitude: find("Longitude").ok_or(LocationLoadError::MissingColumn("Longitude"))?,
            phone: find("Phone"),
        })
    }
}

impl CsvLocationRepository {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LocationLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LocationLoadError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LocationLoadError> {
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::resolve(rdr.headers()?)?;
        let mut locations = Vec::new();
        let mut skipped = 0usize;

        for result in rdr.byte_records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let Ok(record) = StringRecord::from_byte_record(record) else {
                skipped += 1;
                tracing::warn!(line, "Skipping location row that is not valid UTF-8");
                continue;
            };
            match parse_row(&record, &columns) {
                Some(location) => locations.push(location),
                None => {
                    skipped += 1;
                    tracing::warn!(line, "Skipping location row without valid coordinates");
                }
            }
        }

        tracing::info!(loaded = locations.len(), skipped, "Location table loaded");
        Ok(Self { locations })
    }
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Option<Location> {
    let coordinate = |idx: usize| record.get(idx)?.parse::<f64>().ok();
    let point = GeoPoint::new(coordinate(columns.latitude)?, coordinate(columns.longitude)?).ok()?;
    let phone = columns
        .phone
        .and_then(|idx| record.get(idx))
        .unwrap_or_default();

    Some(Location::new(
        record.get(columns.name).unwrap_or_default(),
        phone,
        point.latitude,
        point.longitude,
    ))
}

impl LocationRepository for CsvLocationRepository {
    fn all(&self) -> &[Location] {
        &self.locations
    }
}
