//! Normalization of raw account exports into the location table format.
//!
//! Exports come from different CRMs with different header names, so columns are
//! found from a list of candidates: exact match first, then case-insensitive.
//! The output always has the columns `Name, Phone, Address, Latitude, Longitude`
//! and can be loaded directly by [`super::CsvLocationRepository`].

use crate::domain::geo::GeoPoint;
use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim, Writer};
use std::io::{Read, Write};

const NAME_COLUMNS: &[&str] = &["Account Name", "Account", "Name"];
const PHONE_COLUMNS: &[&str] = &["Phone", "Telephone", "Billing Phone", "Contact Phone"];
const ADDRESS_COLUMNS: &[&str] = &["Address", "Billing Address", "Billing Street"];
const STREET_COLUMNS: &[&str] = &["Billing Street", "Street", "Address", "Billing Address"];
const CITY_COLUMNS: &[&str] = &["Billing City", "City"];
const STATE_COLUMNS: &[&str] = &["Billing State/Province", "State", "Province"];
const ZIP_COLUMNS: &[&str] = &[
    "Billing Zip/Postal Code",
    "Zip",
    "Postal Code",
    "Zip/Postal Code",
];

pub const OUTPUT_HEADERS: [&str; 5] = ["Name", "Phone", "Address", "Latitude", "Longitude"];
pub const MISSING: &str = "N/A";

/// Index of the first candidate header present in `headers`.
pub fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|wanted| headers.iter().position(|h| h == *wanted))
        .or_else(|| {
            candidates.iter().find_map(|wanted| {
                headers
                    .iter()
                    .position(|h| h.eq_ignore_ascii_case(wanted))
            })
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumns {
    pub name: Option<usize>,
    pub phone: Option<usize>,
    pub address: Option<usize>,
    pub street: Option<usize>,
    pub city: Option<usize>,
    pub state: Option<usize>,
    pub zip: Option<usize>,
    pub latitude: Option<usize>,
    pub longitude: Option<usize>,
}

impl SourceColumns {
    pub fn resolve(headers: &StringRecord) -> Self {
        Self {
            name: find_column(headers, NAME_COLUMNS),
            phone: find_column(headers, PHONE_COLUMNS),
            address: find_column(headers, ADDRESS_COLUMNS),
            street: find_column(headers, STREET_COLUMNS),
            city: find_column(headers, CITY_COLUMNS),
            state: find_column(headers, STATE_COLUMNS),
            zip: find_column(headers, ZIP_COLUMNS),
            latitude: find_column(headers, &["Latitude"]),
            longitude: find_column(headers, &["Longitude"]),
        }
    }
}

/// One account row in the normalized shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<GeoPoint>,
}

impl BatchRow {
    fn from_record(record: &StringRecord, columns: &SourceColumns) -> Self {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToOwned::to_owned)
        };

        let address = match columns.address {
            Some(_) => cell(columns.address),
            None => {
                let parts: Vec<String> = [columns.street, columns.city, columns.state, columns.zip]
                    .into_iter()
                    .filter_map(cell)
                    .collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
        };

        let coordinate = |idx: Option<usize>| cell(idx)?.parse::<f64>().ok();
        let coordinates = match (coordinate(columns.latitude), coordinate(columns.longitude)) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).ok(),
            _ => None,
        };

        Self {
            name: cell(columns.name),
            phone: cell(columns.phone),
            address,
            coordinates,
        }
    }

    /// Rows that already have coordinates or lack an address are not geocoded.
    pub fn needs_geocoding(&self) -> bool {
        self.coordinates.is_none() && self.address.is_some()
    }

    fn output_record(&self) -> [String; 5] {
        let or_missing = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_string());
        let (lat, lon) = match self.coordinates {
            Some(p) => (p.latitude.to_string(), p.longitude.to_string()),
            None => (String::new(), String::new()),
        };
        [
            or_missing(&self.name),
            or_missing(&self.phone),
            or_missing(&self.address),
            lat,
            lon,
        ]
    }
}

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<BatchRow>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let columns = SourceColumns::resolve(&lossy(rdr.byte_headers()?));
    tracing::debug!(?columns, "Resolved source columns");

    rdr.byte_records()
        .map(|record| record.map(|r| BatchRow::from_record(&lossy(&r), &columns)))
        .collect()
}

/// Exports are often Windows-1252; undecodable bytes become U+FFFD instead of
/// failing the whole file.
fn lossy(record: &ByteRecord) -> StringRecord {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field))
        .collect()
}

pub fn write_rows<W: Write>(writer: W, rows: &[BatchRow]) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(OUTPUT_HEADERS)?;
    for row in rows {
        wtr.write_record(row.output_record())?;
    }
    wtr.flush()?;
    Ok(())
}
