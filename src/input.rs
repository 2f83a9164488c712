//! Turning user input into the location list sent to the service.

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::ValidationError;
use crate::model::Location;

pub const MIN_LOCATIONS: usize = 2;
pub const MAX_LOCATIONS: usize = 10;

/// Parses `NAME=ADDRESS` or `NAME@LAT,LON`.
pub fn parse_location(input: &str) -> Result<Location, ValidationError> {
    let unparsable = || ValidationError::Unparsable {
        input: input.to_string(),
    };

    if let Some((name, address)) = input.split_once('=') {
        return Ok(Location::with_address(name.trim(), address.trim()));
    }

    let (name, coords) = input.split_once('@').ok_or_else(unparsable)?;
    let (lat, lon) = coords.split_once(',').ok_or_else(unparsable)?;
    let lat: f64 = lat.trim().parse().map_err(|_| unparsable())?;
    let lon: f64 = lon.trim().parse().map_err(|_| unparsable())?;
    Ok(Location::with_coords(name.trim(), lat, lon))
}

/// Reads a JSON array of locations, e.g.
/// ```json
/// [
///   {"name": "Alice", "address": "Victoria Station, London"},
///   {"name": "Charlie", "latitude": 51.5074, "longitude": -0.1278}
/// ]
/// ```
pub fn load_locations(path: &str) -> Result<Vec<Location>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Cannot read locations file {path}"))?;
    let locations: Vec<Location> = serde_json::from_str(&content)
        .with_context(|| format!("Locations file {path} is not a JSON list of locations"))?;
    Ok(locations)
}

/// Checks the request precondition and returns the cleaned-up locations.
///
/// Rows with nothing filled in are dropped. Every remaining row needs a
/// name plus an address or both coordinates, and there must be between
/// [`MIN_LOCATIONS`] and [`MAX_LOCATIONS`] of them.
pub fn validate_locations(locations: &[Location]) -> Result<Vec<Location>, ValidationError> {
    let mut valid = Vec::with_capacity(locations.len());

    for (position, loc) in locations.iter().enumerate() {
        let name = loc.name.trim();
        let address = loc.address.as_deref().map(str::trim).filter(|a| !a.is_empty());
        let coords = loc.coords();

        if name.is_empty() && address.is_none() && loc.latitude.is_none() && loc.longitude.is_none()
        {
            debug!(position, "Skipping blank location row");
            continue;
        }
        if name.is_empty() {
            return Err(ValidationError::MissingName {
                position: position + 1,
            });
        }
        if let Some(c) = coords {
            if !(-90.0..=90.0).contains(&c.lat) || !(-180.0..=180.0).contains(&c.lon) {
                return Err(ValidationError::CoordsOutOfRange {
                    name: name.to_string(),
                });
            }
        } else if address.is_none() {
            return Err(ValidationError::MissingPlace {
                name: name.to_string(),
            });
        }

        valid.push(Location {
            name: name.to_string(),
            address: address.map(str::to_string),
            latitude: coords.map(|c| c.lat),
            longitude: coords.map(|c| c.lon),
        });
    }

    if valid.len() < MIN_LOCATIONS {
        return Err(ValidationError::TooFew {
            min: MIN_LOCATIONS,
            found: valid.len(),
        });
    }
    if valid.len() > MAX_LOCATIONS {
        return Err(ValidationError::TooMany {
            max: MAX_LOCATIONS,
            found: valid.len(),
        });
    }

    Ok(valid)
}
