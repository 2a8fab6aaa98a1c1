//! # Repository Module
//!
//! Database repository implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories                                         │
//! │                                                                         │
//! │  Counter command                                                        │
//! │       │                                                                 │
//! │       │  db.medicines().list_all()                                      │
//! │       ▼                                                                 │
//! │  MedicineRepository        DispenseLogRepository   DispensingRepository │
//! │  ├── register              ├── append              └── record          │
//! │  ├── find_by_name          └── list_all                (one txn:       │
//! │  ├── decrement_stock                                    decrement +    │
//! │  ├── list_all                                           append)        │
//! │  └── list_expired_as_of                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`medicine::MedicineRepository`] - Inventory records and stock levels
//! - [`dispense_log::DispenseLogRepository`] - Append-only audit trail
//! - [`dispensing::DispensingRepository`] - Atomic stock decrement + log entry

pub mod dispense_log;
pub mod dispensing;
pub mod medicine;
