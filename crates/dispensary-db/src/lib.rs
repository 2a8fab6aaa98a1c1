//! # dispensary-db: Database Layer for the Pharmacy Counter
//!
//! Durable storage for medicine records and the dispense log.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dispensary Data Flow                             │
//! │                                                                         │
//! │  Counter command (dispense_medicine)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  dispensary-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │◄───│ MedicineRepo   │   │ 001_init.sql │   │   │
//! │  │   │ SqlitePool    │    │ DispenseLogRepo│   │              │   │   │
//! │  │   │               │    │ DispensingRepo │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/dispensary.db                                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection setup and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Medicine, dispense log, and dispensing repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dispensary_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/dispensary.db")).await?;
//!
//! let stock = db.medicines().list_all().await?;
//! let dispensed = db.dispensing().record(&request, clock.now()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::dispense_log::DispenseLogRepository;
pub use repository::dispensing::DispensingRepository;
pub use repository::medicine::MedicineRepository;
