use thiserror::Error;

/// Rejected caller input. Each variant names the field that failed so the
/// form layer can point at it instead of the core silently clamping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        value: f64,
        min: f64,
    },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{field} has no known value '{value}'")]
    UnknownLabel { field: &'static str, value: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotFinite { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::UnknownLabel { field, .. } => field,
        }
    }
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

pub(crate) fn require_score(field: &'static str, value: u8) -> Result<(), ValidationError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value: i64::from(value),
            min: 1,
            max: 5,
        })
    }
}
