//! FILENAME: core/chart-engine/src/error.rs

use thiserror::Error;

/// Errors raised while building a chart description.
/// The dashboard catches these per view; they never abort a render.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("Cannot aggregate '{field}': {reason}")]
    Aggregation { field: String, reason: String },

    #[error("Invalid selection for {field}: '{value}'")]
    InvalidSelection { field: String, value: String },
}

impl ChartError {
    pub(crate) fn non_finite(field: &str, value: f64) -> Self {
        ChartError::Aggregation {
            field: field.to_string(),
            reason: format!("non-finite value {}", value),
        }
    }
}
