//! HTTP client for a `/calculate` evaluator endpoint.

use super::{CalculateRequest, CalculateResponse, CalculationError, CalculationResult, Evaluator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Where and how to reach the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Full URL of the calculate endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EvaluatorConfig {
    /// Default endpoint: a local development server
    pub const DEFAULT_ENDPOINT: &'static str = "http://127.0.0.1:5000/calculate";
    /// Default request timeout
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Create a config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint URL
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout in seconds
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Request timeout as a duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Evaluator backed by a JSON `POST` endpoint
#[derive(Debug, Clone)]
pub struct HttpEvaluator {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpEvaluator {
    /// Creates an evaluator from `config`
    #[must_use]
    pub fn new(config: &EvaluatorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();
        Self::with_client(config.endpoint.clone(), client)
    }

    /// Creates an evaluator using a preconfigured reqwest client
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Returns the endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    async fn evaluate(&self, expression: &str) -> CalculationResult<f64> {
        let request = CalculateRequest {
            expression: expression.to_string(),
        };
        info!(endpoint = %self.endpoint, %expression, "sending expression to evaluator");

        let resp = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CalculationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        debug!(%body, "evaluator response");
        let response: CalculateResponse = serde_json::from_str(&body)
            .map_err(|e| CalculationError::MalformedResponse(e.to_string()))?;
        response.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:5000/calculate");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_builder() {
        let config = EvaluatorConfig::new()
            .with_endpoint("http://calc.local/calculate")
            .with_timeout_secs(3);
        assert_eq!(config.endpoint, "http://calc.local/calculate");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_config_partial_deserialization() {
        let config: EvaluatorConfig =
            serde_json::from_str(r#"{"endpoint": "http://10.0.0.2/calculate"}"#).unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.2/calculate");
        assert_eq!(config.timeout_secs, EvaluatorConfig::DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_evaluator_keeps_endpoint() {
        let evaluator = HttpEvaluator::new(&EvaluatorConfig::default());
        assert_eq!(evaluator.endpoint(), EvaluatorConfig::DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = EvaluatorConfig::new()
            .with_endpoint("http://127.0.0.1:1/calculate")
            .with_timeout_secs(2);
        let err = HttpEvaluator::new(&config).evaluate("1+1").await.unwrap_err();
        assert!(matches!(err, CalculationError::Transport(_)));
    }
}
