//! Geocode an account export into a location table for the server.
//!
//! Reads a CSV export, resolves the name/phone/address columns, geocodes every
//! row that has an address but no coordinates, and writes
//! `Name, Phone, Address, Latitude, Longitude`.
//!
//! Usage:
//!     cargo run --bin geocode_locations -- locations.csv locations_with_coords.csv
//!
//! Requires `ORS_API_KEY`; honours `ORS_BASE_URL`, `GEOCODE_MIN_INTERVAL_MS`,
//! `REQUEST_TIMEOUT_SECS`, `RETRY_MAX_ATTEMPTS` and `RETRY_BASE_DELAY_MS` the
//! same way the server does. `GEOCODE_COUNTRY` is ignored: account exports can
//! span countries, so searches here are unfiltered.

use anyhow::Context;
use locator::{
    config::Config,
    infrastructure::{
        geocoding::{OrsClient, ProviderError},
        locations::batch,
        lookup::LookupClient,
    },
};
use std::{fs::File, sync::Arc};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        eprintln!("❌ Usage: geocode_locations <input.csv> <output.csv>");
        std::process::exit(2);
    };

    let config = Config::from_env()?;
    let ors = Arc::new(OrsClient::new(
        &config.ors_base_url,
        config.ors_api_key.clone(),
        None,
        config.request_timeout(),
    )?);
    let lookup = LookupClient::new(ors.clone(), ors, config.lookup_settings());

    let file = File::open(&input).with_context(|| format!("opening {}", input))?;
    let mut rows = batch::read_rows(file).with_context(|| format!("reading {}", input))?;

    println!("\n📍 Geocoding {} rows from {}\n", rows.len(), input);

    let (mut found, mut missed) = (0usize, 0usize);
    for (i, row) in rows.iter_mut().enumerate() {
        let label = row.name.as_deref().unwrap_or(batch::MISSING);
        if !row.needs_geocoding() {
            if row.coordinates.is_some() {
                println!("Row {}: '{}' already has coordinates, skipping", i, label);
            } else {
                println!("Row {}: no address, skipping", i);
            }
            continue;
        }
        let address = row.address.clone().unwrap_or_default();

        println!("Row {}: Geocoding: {}", i, address);
        match lookup.geocode(&address).await {
            Ok(point) => {
                println!("   → {}, {}", point.latitude, point.longitude);
                row.coordinates = Some(point);
                found += 1;
            }
            Err(ProviderError::NotFound(_)) => {
                println!("   → Address not found");
                missed += 1;
            }
            Err(e) => {
                eprintln!("   ⚠️  Giving up on {}: {}", address, e);
                missed += 1;
            }
        }
    }

    let file = File::create(&output).with_context(|| format!("creating {}", output))?;
    batch::write_rows(file, &rows).with_context(|| format!("writing {}", output))?;

    println!(
        "\n✅ Done! {} geocoded, {} without coordinates. Saved to {}",
        found, missed, output
    );
    Ok(())
}
