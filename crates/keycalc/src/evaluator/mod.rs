//! Remote evaluation
//!
//! The calculator does no arithmetic itself. On `=` the expression is
//! normalised to ASCII operators and handed to an [`Evaluator`], normally
//! the [`HttpEvaluator`] which posts it to a `/calculate` endpoint.
//!
//! Wire contract:
//!
//! ```text
//! POST /calculate  {"expression": "12+8*3"}
//! 200              {"result": 36.0}
//! 4xx/5xx          {"error": "..."}   (any body)
//! 200              {"error": "..."}   (also a failure)
//! ```

mod http;

pub use http::{EvaluatorConfig, HttpEvaluator};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Anything that can go wrong while evaluating an expression.
///
/// All variants are handled the same way by the session: the display shows
/// the error sentinel and an alert is raised.
#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    /// Request could not be sent or the response not read
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Evaluator answered with a non-success status
    #[error("HTTP Error: {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },
    /// Evaluator reported an error for the expression
    #[error("{0}")]
    Rejected(String),
    /// Response body was not the expected JSON shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Result type for evaluator calls
pub type CalculationResult<T> = Result<T, CalculationError>;

/// Evaluates a normalised arithmetic expression
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Evaluates `expression` (ASCII operators, `.` decimal separator)
    async fn evaluate(&self, expression: &str) -> CalculationResult<f64>;
}

#[async_trait]
impl<T: Evaluator + ?Sized> Evaluator for std::sync::Arc<T> {
    async fn evaluate(&self, expression: &str) -> CalculationResult<f64> {
        (**self).evaluate(expression).await
    }
}

/// Request body sent to the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Normalised expression
    pub expression: String,
}

/// Response body returned by the evaluator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Numeric result on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    /// Error message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculateResponse {
    /// Successful response carrying `value`
    #[must_use]
    pub fn success(value: f64) -> Self {
        Self {
            result: Some(value),
            error: None,
        }
    }

    /// Error response carrying `message`
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(message.into()),
        }
    }

    /// Converts the body into the evaluated value.
    ///
    /// A non-empty `error` wins over any `result`.
    pub fn into_result(self) -> CalculationResult<f64> {
        if let Some(message) = self.error.filter(|m| !m.is_empty()) {
            return Err(CalculationError::Rejected(message));
        }
        self.result
            .ok_or_else(|| CalculationError::MalformedResponse("missing result".to_string()))
    }
}

/// Replaces display glyphs with the ASCII forms the evaluator expects:
/// `×` → `*`, `÷` → `/`, `,` → `.`
#[must_use]
pub fn normalize_expression(expression: &str) -> String {
    expression
        .chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            ',' => '.',
            other => other,
        })
        .collect()
}
