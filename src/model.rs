//! Typed shape of a meeting-point computation response.
//!
//! These types mirror the JSON the service returns. Nothing in here knows how
//! the service ranks stations; the client only organizes and renders them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A `(latitude, longitude)` pair, carried on the wire as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLng> for (f64, f64) {
    fn from(p: LatLng) -> Self {
        (p.lat, p.lon)
    }
}

/// One person's starting point. Identity is `name`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Location {
    pub fn with_address(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: Some(address.into()),
            ..Default::default()
        }
    }

    pub fn with_coords(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            address: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Explicit coordinates, when both halves are present.
    pub fn coords(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(LatLng::new(lat, lon)),
            _ => None,
        }
    }
}

/// One mode-homogeneous segment of a journey.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Leg {
    pub mode: String,
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub to_name: String,
    #[serde(default)]
    pub from_coords: Option<LatLng>,
    #[serde(default)]
    pub to_coords: Option<LatLng>,
    /// Minutes.
    #[serde(default)]
    pub duration: u32,
    /// Meters.
    #[serde(default)]
    pub distance: Option<u32>,
    #[serde(default)]
    pub line_name: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub stops: Option<u32>,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub intermediate_stops: Option<Vec<LatLng>>,
}

impl Leg {
    pub fn intermediate(&self) -> &[LatLng] {
        self.intermediate_stops.as_deref().unwrap_or(&[])
    }
}

pub const ROUTE_TYPE_ESTIMATED: &str = "estimated";

/// One person's route to a candidate station.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Journey {
    pub from_location: String,
    #[serde(default)]
    pub to_station: String,
    pub duration_minutes: u32,
    #[serde(default = "default_route_type")]
    pub route_type: String,
    #[serde(default)]
    pub departure_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub arrival_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub total_walking_duration: u32,
    #[serde(default)]
    pub total_transfers: u32,
}

fn default_route_type() -> String {
    "public_transport".to_string()
}

impl Journey {
    /// `true` when the service could not route this journey live and fell
    /// back to an estimate.
    pub fn is_estimated(&self) -> bool {
        self.route_type.eq_ignore_ascii_case(ROUTE_TYPE_ESTIMATED)
    }
}

/// Categorical fairness label attached to each candidate station.
///
/// Labels the client does not recognize are kept verbatim in `Other` so a
/// saved result reads back exactly as the service sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FairnessRating {
    VeryFair,
    Fair,
    Moderate,
    SomewhatUnfair,
    Unfair,
    Other(String),
}

impl Default for FairnessRating {
    fn default() -> Self {
        FairnessRating::Other(String::new())
    }
}

impl From<String> for FairnessRating {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Very Fair" => FairnessRating::VeryFair,
            "Fair" => FairnessRating::Fair,
            "Moderate" => FairnessRating::Moderate,
            "Somewhat Unfair" => FairnessRating::SomewhatUnfair,
            "Unfair" => FairnessRating::Unfair,
            _ => FairnessRating::Other(label),
        }
    }
}

impl From<FairnessRating> for String {
    fn from(rating: FairnessRating) -> Self {
        match rating {
            FairnessRating::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl FairnessRating {
    pub fn label(&self) -> &str {
        match self {
            FairnessRating::VeryFair => "Very Fair",
            FairnessRating::Fair => "Fair",
            FairnessRating::Moderate => "Moderate",
            FairnessRating::SomewhatUnfair => "Somewhat Unfair",
            FairnessRating::Unfair => "Unfair",
            FairnessRating::Other(label) if label.is_empty() => "Unknown",
            FairnessRating::Other(label) => label,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FairnessRating::VeryFair => "Everyone travels similar times",
            FairnessRating::Fair => "Journey times are well balanced",
            FairnessRating::Moderate => "Some variation in journey times",
            FairnessRating::SomewhatUnfair => "Significant differences in travel",
            FairnessRating::Unfair => "Large disparities in journey times",
            FairnessRating::Other(_) => "Unknown fairness rating",
        }
    }
}

/// A candidate meeting station. `journey_times[i]` belongs to the i-th
/// processed location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Station {
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub average_journey_time: f64,
    pub max_journey_time: f64,
    #[serde(default)]
    pub total_journey_time: f64,
    #[serde(default)]
    pub fairness_score: FairnessRating,
    #[serde(default)]
    pub journey_times: Vec<Journey>,
}

impl Station {
    pub fn coords(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// A full computation response. `alternative_stations` arrives ranked best
/// first and is never re-sorted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingPointResult {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    pub optimal_station: Station,
    #[serde(default)]
    pub alternative_stations: Vec<Station>,
    pub processed_locations: Vec<Location>,
    pub map_center: LatLng,
}

impl MeetingPointResult {
    /// Reads a previously saved result document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
