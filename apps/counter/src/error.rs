//! # API Error Type
//!
//! Unified error type for counter commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Counter                            │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<Notification, ApiError>                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Form rejected?  ─── ValidationError ──────────┐                        │
//! │  Rule rejected?  ─── CoreError ────────────────┤                        │
//! │  Store failed?   ─── DbError ──────────────────┼──► ApiError            │
//! │  Mirror failed?  ─── MirrorError ──────────────┘        │               │
//! │                                                         ▼               │
//! │                                         Notification { title, message } │
//! │                                         "Error" / "File Error"          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No error leaves the command boundary: the console shows the notification
//! and waits for the next action.

use crate::notification::Notification;
use crate::state::MirrorError;
use dispensary_core::{CoreError, ValidationError};
use dispensary_db::DbError;

/// Shown when the registration form has an empty field.
pub const FILL_ALL_FIELDS: &str = "Fill all fields!";

/// Shown when the dispense form is incomplete or names an unknown medicine.
pub const INVALID_DISPENSE: &str = "Invalid input or medication not found!";

/// Shown when the medicine does not have enough units left.
pub const INSUFFICIENT_STOCK: &str = "Insufficient stock!";

/// Error returned from counter commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Operator-facing message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Medicine not found
    NotFound,

    /// Form input validation failed
    ValidationError,

    /// Requested quantity exceeds stock
    InsufficientStock,

    /// Database operation failed
    DatabaseError,

    /// Mirror file could not be written
    FileError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// The combined "invalid input or not found" rejection of a dispense.
    pub fn invalid_dispense() -> Self {
        ApiError::validation(INVALID_DISPENSE)
    }

    /// Converts the error into the notification shown to the operator.
    pub fn notification(&self) -> Notification {
        let title = match self.code {
            ErrorCode::FileError => "File Error",
            _ => "Error",
        };
        Notification::new(title, self.message.clone())
    }
}

/// Converts form validation errors to API errors.
///
/// Used by registration; dispensing reports every form problem as
/// [`INVALID_DISPENSE`] instead.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Required { .. } => ApiError::validation(FILL_ALL_FIELDS),
            other => ApiError::validation(other.to_string()),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MedicineNotFound(_) => ApiError::new(ErrorCode::NotFound, INVALID_DISPENSE),
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, INSUFFICIENT_STOCK)
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Rejected(e) => ApiError::from(e),
            DbError::NotFound { entity, id } => {
                ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::ConstraintViolation { message } => {
                tracing::error!("Constraint violation: {}", message);
                ApiError::validation("Rejected by the database")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but show a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts mirror file failures to API errors.
impl From<MirrorError> for ApiError {
    fn from(err: MirrorError) -> Self {
        ApiError::new(
            ErrorCode::FileError,
            format!("Could not write to log file:\n{}", err),
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = ApiError::from(ValidationError::Required {
            field: "stock".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.notification(), Notification::new("Error", "Fill all fields!"));
    }

    #[test]
    fn test_dispense_rejections() {
        let not_found = ApiError::from(DbError::Rejected(CoreError::MedicineNotFound(
            "Aspirin".to_string(),
        )));
        assert_eq!(not_found.code, ErrorCode::NotFound);
        assert_eq!(not_found.message, INVALID_DISPENSE);

        let short = ApiError::from(DbError::Rejected(CoreError::InsufficientStock {
            medicine: "Paracetamol".to_string(),
            available: 80,
            requested: 90,
        }));
        assert_eq!(short.code, ErrorCode::InsufficientStock);
        assert_eq!(short.notification(), Notification::new("Error", "Insufficient stock!"));
    }

    #[test]
    fn test_mirror_failure_is_file_error() {
        let err = ApiError::from(MirrorError {
            path: "/nowhere/medicine_log.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        let note = err.notification();
        assert_eq!(note.title, "File Error");
        assert!(note.message.starts_with("Could not write to log file:\n"));
        assert!(note.message.contains("denied"));
    }

    #[test]
    fn test_storage_failure_hides_detail() {
        let err = ApiError::from(DbError::QueryFailed("disk I/O error".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }
}
