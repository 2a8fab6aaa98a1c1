//! # Error Types
//!
//! Domain error types for dispensary-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dispensary-core errors (this file)                                     │
//! │  ├── CoreError        - Stock rules, missing medicine                   │
//! │  └── ValidationError  - Empty or malformed form fields                  │
//! │                                                                         │
//! │  dispensary-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  counter errors (in app)                                                │
//! │  ├── MirrorError      - Advisory mirror-file append failed              │
//! │  └── ApiError         - What the operator sees (title + message)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised while dispensing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No medicine record carries this name.
    #[error("Medicine not found: {0}")]
    MedicineNotFound(String),

    /// Requested quantity exceeds the current stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Give Medicine (qty: 90)
    ///      │
    ///      ▼
    /// Check stock: available=80
    ///      │
    ///      ▼
    /// InsufficientStock { medicine: "Paracetamol", available: 80, requested: 90 }
    ///      │
    ///      ▼
    /// Counter shows: "Insufficient stock!"
    /// ```
    #[error("Insufficient stock for {medicine}: available {available}, requested {requested}")]
    InsufficientStock {
        medicine: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric stock, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            medicine: "Paracetamol".to_string(),
            available: 80,
            requested: 90,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Paracetamol: available 80, requested 90"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::invalid("stock", "must be a whole number").to_string(),
            "stock has invalid format: must be a whole number"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("patient").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
