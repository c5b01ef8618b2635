use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Value;

/// One evaluated line in the calculator history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Input exactly as typed, trimmed
    pub expression: String,
    /// Result on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error message on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the expression was evaluated
    pub evaluated_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry for a successful evaluation
    pub fn success(expression: impl Into<String>, result: Value) -> Self {
        Self {
            expression: expression.into(),
            result: Some(result),
            error: None,
            evaluated_at: Utc::now(),
        }
    }

    /// Create an entry for a failed evaluation
    pub fn failure(expression: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: None,
            error: Some(error.into()),
            evaluated_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// Render as `expression = result` or `expression -> error: message`
    pub fn display_line(&self, precision: usize) -> String {
        match (&self.result, &self.error) {
            (Some(value), _) => format!("{} = {}", self.expression, value.format(precision)),
            (None, Some(error)) => format!("{} -> error: {}", self.expression, error),
            (None, None) => self.expression.clone(),
        }
    }
}
