use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::fetch::{BasicClient, HttpClient, execute_json, json_request};
use crate::model::MeetingPointResult;
use crate::services::meeting_api::{
    GeocodedAddress, HealthStatus, MeetingPointApi, MeetingPointRequest, StationInfo,
};

#[derive(Deserialize)]
struct StationsResponse {
    stations: Vec<StationInfo>,
}

/// HTTP client for the Where2Meet API.
pub struct Where2MeetClient<C = BasicClient> {
    http: C,
    base_url: String,
}

impl Where2MeetClient<BasicClient> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_http(
            BasicClient::from_config(config)?,
            &config.base_url,
        ))
    }
}

impl<C: HttpClient> Where2MeetClient<C> {
    pub fn with_http(http: C, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl<C: HttpClient> MeetingPointApi for Where2MeetClient<C> {
    #[tracing::instrument(skip_all, fields(locations = request.locations.len(), use_tfl_api = request.use_tfl_api))]
    async fn calculate(
        &self,
        request: &MeetingPointRequest,
    ) -> Result<MeetingPointResult, ClientError> {
        let req = json_request(
            Method::POST,
            &self.url("/api/meeting-points/calculate"),
            Some(request),
        )?;
        let result: MeetingPointResult =
            execute_json(&self.http, req, "Failed to calculate meeting point").await?;

        info!(
            request_id = result.request_id.as_deref().unwrap_or("-"),
            optimal = %result.optimal_station.station_name,
            alternatives = result.alternative_stations.len(),
            "Meeting point calculated"
        );
        Ok(result)
    }

    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodedAddress, ClientError> {
        let mut req = json_request::<()>(
            Method::POST,
            &self.url("/api/meeting-points/geocode"),
            None,
        )?;
        req.url_mut().query_pairs_mut().append_pair("address", address);
        execute_json(&self.http, req, "Failed to geocode address").await
    }

    #[tracing::instrument(skip(self))]
    async fn list_stations(&self) -> Result<Vec<StationInfo>, ClientError> {
        let req = json_request::<()>(Method::GET, &self.url("/api/meeting-points/stations"), None)?;
        let resp: StationsResponse =
            execute_json(&self.http, req, "Failed to fetch stations").await?;
        Ok(resp.stations)
    }

    #[tracing::instrument(skip(self))]
    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let req = json_request::<()>(Method::GET, &self.url("/api/health/"), None)?;
        execute_json(&self.http, req, "Health check failed").await
    }
}
