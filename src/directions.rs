//! HTTP adapter for the hosted directions service.

use tracing::warn;

use crate::coord::Coordinate;
use crate::directions_data::DirectionsResponse;
use crate::traits::{DirectionsError, DirectionsProvider, DirectionsRequest};

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/directions/json".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsClient {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl DirectionsClient {
    pub fn new(config: DirectionsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

fn format_point(point: Coordinate) -> String {
    format!("{:.6},{:.6}", point.latitude, point.longitude)
}

impl DirectionsProvider for DirectionsClient {
    fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, DirectionsError> {
        let mut query = vec![
            ("origin".to_string(), format_point(request.origin)),
            ("destination".to_string(), format_point(request.destination)),
            ("key".to_string(), self.config.api_key.clone()),
        ];
        if !request.waypoints.is_empty() {
            let waypoints = request
                .waypoints
                .iter()
                .map(|point| format_point(*point))
                .collect::<Vec<_>>()
                .join("|");
            query.push(("waypoints".to_string(), waypoints));
        }

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<DirectionsResponse>())?;

        if !response.is_ok() {
            warn!(status = %response.status, "directions service rejected request");
            return Err(DirectionsError::Status(response.status));
        }

        Ok(response)
    }
}
