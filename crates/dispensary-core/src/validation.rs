//! # Validation Module
//!
//! Turns raw form fields (always text) into typed requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Counter form                                                  │
//! │  └── Collects text fields as typed                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Every field present (after trimming)                               │
//! │  ├── Stock / quantity are whole numbers                                 │
//! │  └── Expiry date is YYYY-MM-DD                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL constraints                                               │
//! │  └── CHECK (stock >= 0), CHECK (quantity > 0)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Names are trimmed before storage and before lookup, so `" Paracetamol"` and
//! `"Paracetamol"` refer to the same medicine.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{DispenseRequest, NewMedicine};
use crate::DATE_FORMAT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Register Form
// =============================================================================

/// Raw fields of the "Add Medicine" form.
#[derive(Debug, Clone, Default)]
pub struct RegisterInput<'a> {
    pub name: &'a str,
    pub stock: &'a str,
    pub expiry: &'a str,
}

impl<'a> RegisterInput<'a> {
    pub fn new(name: &'a str, stock: &'a str, expiry: &'a str) -> Self {
        RegisterInput {
            name,
            stock,
            expiry,
        }
    }

    /// Validates the form.
    ///
    /// All three fields are checked for presence before any of them is parsed,
    /// so a form with an empty field always reports `Required`.
    ///
    /// ## Example
    /// ```rust
    /// use dispensary_core::validation::RegisterInput;
    /// use dispensary_core::ValidationError;
    ///
    /// let err = RegisterInput::new("Paracetamol", "", "abc").parse().unwrap_err();
    /// assert!(matches!(err, ValidationError::Required { .. }));
    /// ```
    pub fn parse(&self) -> ValidationResult<NewMedicine> {
        let name = required("name", self.name)?;
        let stock = required("stock", self.stock)?;
        let expiry = required("expiry date", self.expiry)?;

        Ok(NewMedicine {
            name: name.to_string(),
            stock: parse_stock(stock)?,
            expiry_date: parse_expiry_date(expiry)?,
        })
    }
}

// =============================================================================
// Dispense Form
// =============================================================================

/// Raw fields of the "Give Medicine" form.
#[derive(Debug, Clone, Default)]
pub struct DispenseInput<'a> {
    pub patient: &'a str,
    pub medicine: &'a str,
    pub quantity: &'a str,
}

impl<'a> DispenseInput<'a> {
    pub fn new(patient: &'a str, medicine: &'a str, quantity: &'a str) -> Self {
        DispenseInput {
            patient,
            medicine,
            quantity,
        }
    }

    /// Validates the form. Quantity must be a positive whole number.
    pub fn parse(&self) -> ValidationResult<DispenseRequest> {
        let patient = required("patient", self.patient)?;
        let medicine = required("medicine", self.medicine)?;
        let quantity = required("quantity", self.quantity)?;

        Ok(DispenseRequest {
            patient_name: patient.to_string(),
            medicine_name: medicine.to_string(),
            quantity: parse_quantity(quantity)?,
        })
    }
}

// =============================================================================
// Field Validators
// =============================================================================

fn required<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value)
}

/// Parses a stock level: a whole number, zero allowed.
///
/// ```rust
/// use dispensary_core::validation::parse_stock;
///
/// assert_eq!(parse_stock("100").unwrap(), 100);
/// assert_eq!(parse_stock("0").unwrap(), 0);
/// assert!(parse_stock("-1").is_err());
/// assert!(parse_stock("ten").is_err());
/// ```
pub fn parse_stock(value: &str) -> ValidationResult<i64> {
    let stock: i64 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::invalid("stock", "must be a whole number"))?;

    if stock < 0 {
        return Err(ValidationError::invalid("stock", "cannot be negative"));
    }

    Ok(stock)
}

/// Parses a dispense quantity: a whole number greater than zero.
pub fn parse_quantity(value: &str) -> ValidationResult<i64> {
    let quantity: i64 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::invalid("quantity", "must be a whole number"))?;

    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(quantity)
}

/// Parses a calendar date written exactly as `YYYY-MM-DD`.
pub fn parse_expiry_date(value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();

    // chrono accepts single-digit months and days; the stored text must sort
    // lexically, so insist on the zero-padded layout.
    if value.len() != 10 {
        return Err(ValidationError::invalid("expiry date", "expected YYYY-MM-DD"));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::invalid("expiry date", "expected YYYY-MM-DD"))
}
