//! # dispensary-core: Domain Logic for the Pharmacy Counter
//!
//! Pure types and rules shared by the store and the counter application.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dispensary Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Counter (terminal front end)                 │   │
//! │  │   Add Medicine ─► Give Medicine ─► Stock / Expiry / Logs        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ dispensary-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   clock   │  │validation │  │   error   │   │   │
//! │  │   │ Medicine  │  │ CivilClock│  │ Register  │  │ CoreError │   │   │
//! │  │   │ LogEntry  │  │ Timestamp │  │ Dispense  │  │ Validation│   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO FILES • PURE FUNCTIONS                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 dispensary-db (Database Layer)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Medicine records, dispense log entries, report lines
//! - [`clock`] - Civil timestamps in a fixed named zone
//! - [`validation`] - Parsing of raw form fields into typed requests
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dispensary_core::validation::RegisterInput;
//!
//! let medicine = RegisterInput::new("Paracetamol", "100", "2025-01-01")
//!     .parse()
//!     .unwrap();
//! assert_eq!(medicine.stock, 100);
//! ```

pub mod clock;
pub mod error;
pub mod types;
pub mod validation;

pub use clock::{CivilClock, CivilTimestamp};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
pub use validation::{DispenseInput, RegisterInput};

/// Header written as the first line of a fresh mirror file.
pub const MIRROR_FILE_HEADER: &str = "Medicine Dispense Log";

/// Civil timestamp layout shared by the log table and the mirror file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Expiry date layout accepted on registration.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
