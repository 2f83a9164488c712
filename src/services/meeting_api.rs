//! Trait and types for the meeting-point computation service.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::model::{Location, MeetingPointResult};

/// Body of a calculation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingPointRequest {
    pub locations: Vec<Location>,
    pub use_tfl_api: bool,
}

/// Coordinates the service resolved for a free-text address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodedAddress {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A station the service may pick as a meeting point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationInfo {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Abstraction over the remote service that ranks candidate stations.
#[async_trait::async_trait]
pub trait MeetingPointApi: Send + Sync {
    /// Asks for the fairest meeting station for `request.locations`.
    async fn calculate(&self, request: &MeetingPointRequest)
    -> Result<MeetingPointResult, ClientError>;

    async fn geocode(&self, address: &str) -> Result<GeocodedAddress, ClientError>;

    /// Every station the service considers.
    async fn list_stations(&self) -> Result<Vec<StationInfo>, ClientError>;

    async fn health(&self) -> Result<HealthStatus, ClientError>;
}
