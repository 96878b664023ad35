//! Growth Coach Client
//!
//! Client for the hosted AI coaching microservice that turns crop
//! context into short daily growing advice.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::CoachConfig;
use crate::error::{AppError, AppResult};

/// Client for the growth coach microservice
#[derive(Clone)]
pub struct GrowthCoachClient {
    api_endpoint: String,
    api_key: String,
    http_client: Client,
}

/// Crop context sent to the coach
#[derive(Debug, Clone, Serialize)]
pub struct CoachRequest {
    pub seed_name: String,
    pub current_day: u32,
    pub growth_days: u32,
    pub phase: String,
    pub ideal_temperature_celsius: f64,
    pub ideal_humidity_percent: f64,
    pub recent_logs: Vec<CoachLogSummary>,
}

/// Condensed daily log included in the coach context
#[derive(Debug, Clone, Serialize)]
pub struct CoachLogSummary {
    pub day_number: u32,
    pub watered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_celsius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_percent: Option<f64>,
}

/// Request body for the suggestion endpoint
#[derive(Debug, Serialize)]
struct SuggestRequest {
    prompt: String,
}

/// Response from the suggestion endpoint
#[derive(Debug, Deserialize)]
struct SuggestResponse {
    suggestion: String,
}

impl GrowthCoachClient {
    /// Create a new growth coach client
    pub fn new(api_endpoint: String, api_key: String) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_endpoint,
            api_key,
            http_client,
        }
    }

    /// Create a client from configuration, None when the coach is not configured
    pub fn from_config(config: &CoachConfig) -> Option<Self> {
        if config.api_endpoint.is_empty() || config.api_key.is_empty() {
            return None;
        }
        Some(Self::new(
            config.api_endpoint.clone(),
            config.api_key.clone(),
        ))
    }

    /// Ask the coach for a tip about the crop's current state
    pub async fn suggest(&self, request: &CoachRequest) -> AppResult<String> {
        let url = format!("{}/v1/suggestions", self.api_endpoint);
        let body = SuggestRequest {
            prompt: build_prompt(request),
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::CoachServiceUnavailable);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: SuggestResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse response: {}", e)))?;

        Ok(result.suggestion)
    }
}

/// Build the coach prompt from crop context
fn build_prompt(request: &CoachRequest) -> String {
    let mut prompt = format!(
        "You are an expert microgreens growing coach. The grower has {} on day {} of {} ({} phase). Ideal conditions are {} C and {}% humidity.",
        request.seed_name,
        request.current_day,
        request.growth_days,
        request.phase,
        request.ideal_temperature_celsius,
        request.ideal_humidity_percent
    );

    if request.recent_logs.is_empty() {
        prompt.push_str(" No care has been logged yet.");
    }
    for log in &request.recent_logs {
        prompt.push_str(&format!(
            " Day {}: watered {}, temperature {}, humidity {}.",
            log.day_number,
            if log.watered { "yes" } else { "no" },
            reading(log.temperature_celsius, " C"),
            reading(log.humidity_percent, "%")
        ));
    }

    prompt.push_str(" Reply with two or three short, actionable tips for today.");
    prompt
}

fn reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{}", v, unit),
        None => "not recorded".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CoachRequest {
        CoachRequest {
            seed_name: "Sunflower".to_string(),
            current_day: 4,
            growth_days: 10,
            phase: "Light".to_string(),
            ideal_temperature_celsius: 22.5,
            ideal_humidity_percent: 50.0,
            recent_logs: vec![CoachLogSummary {
                day_number: 3,
                watered: true,
                temperature_celsius: Some(23.0),
                humidity_percent: None,
            }],
        }
    }

    #[test]
    fn test_from_config_requires_endpoint_and_key() {
        let disabled = CoachConfig {
            api_endpoint: String::new(),
            api_key: "secret".to_string(),
        };
        assert!(GrowthCoachClient::from_config(&disabled).is_none());

        let enabled = CoachConfig {
            api_endpoint: "https://coach.example.com".to_string(),
            api_key: "secret".to_string(),
        };
        assert!(GrowthCoachClient::from_config(&enabled).is_some());
    }

    #[test]
    fn test_build_prompt_includes_crop_context() {
        let prompt = build_prompt(&sample_request());
        assert!(prompt.contains("Sunflower"));
        assert!(prompt.contains("day 4 of 10"));
        assert!(prompt.contains("Day 3: watered yes"));
        assert!(prompt.contains("humidity not recorded"));
    }

    #[test]
    fn test_build_prompt_without_logs() {
        let mut request = sample_request();
        request.recent_logs.clear();
        let prompt = build_prompt(&request);
        assert!(prompt.contains("No care has been logged yet"));
    }
}
