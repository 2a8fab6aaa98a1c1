//! # Domain Types
//!
//! Core domain types used throughout the counter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐          ┌──────────────────────┐                  │
//! │  │    Medicine     │          │   DispenseLogEntry   │                  │
//! │  │  ─────────────  │  name    │  ──────────────────  │                  │
//! │  │  id (auto)      │◄ ─ ─ ─ ─ │  id (auto)           │                  │
//! │  │  name           │ (copied, │  patient_name        │                  │
//! │  │  stock (>= 0)   │  not FK) │  medicine_name       │                  │
//! │  │  expiry_date    │          │  quantity (> 0)      │                  │
//! │  └─────────────────┘          │  taken_at            │                  │
//! │                               └──────────────────────┘                  │
//! │                                                                         │
//! │  Report lines: StockLine (name, stock), ExpiredLine (name, expiry)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A log entry copies the medicine name at the time of dispensing. Medicines are
//! never renamed or deleted, so the copy never drifts; duplicate names do make the
//! reference ambiguous.

use chrono::NaiveDate;

use crate::clock::CivilTimestamp;

// =============================================================================
// Medicine
// =============================================================================

/// A named, stocked, dated inventory item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Medicine {
    /// Auto-assigned row id, stable for the record's lifetime.
    pub id: i64,

    /// Display name. Not unique.
    pub name: String,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Last usable day (inclusive).
    pub expiry_date: NaiveDate,
}

impl Medicine {
    /// Checks if `quantity` units can be taken from this record.
    pub fn can_dispense(&self, quantity: i64) -> bool {
        quantity > 0 && quantity <= self.stock
    }

    /// Checks if the medicine counts as expired on `date`.
    ///
    /// A medicine expiring today is already expired.
    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        self.expiry_date <= date
    }
}

/// A validated registration, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedicine {
    pub name: String,
    pub stock: i64,
    pub expiry_date: NaiveDate,
}

// =============================================================================
// Dispensing
// =============================================================================

/// A validated dispense request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispenseRequest {
    pub patient_name: String,
    pub medicine_name: String,
    /// Always positive once validated.
    pub quantity: i64,
}

/// One row of the append-only audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispenseLogEntry {
    pub id: i64,
    pub patient_name: String,
    /// Medicine name at time of dispensing (frozen).
    pub medicine_name: String,
    pub quantity: i64,
    pub taken_at: CivilTimestamp,
}

impl DispenseLogEntry {
    /// Line appended to the mirror file.
    ///
    /// `2025-01-01 10:00:00 - Juan took 20 Paracetamol`
    pub fn mirror_line(&self) -> String {
        format!(
            "{} - {} took {} {}",
            self.taken_at, self.patient_name, self.quantity, self.medicine_name
        )
    }

    /// Line shown in the log history report.
    ///
    /// `2025-01-01 10:00:00 - Juan took 20 of Paracetamol`
    pub fn history_line(&self) -> String {
        format!(
            "{} - {} took {} of {}",
            self.taken_at, self.patient_name, self.quantity, self.medicine_name
        )
    }
}

/// Result of a committed dispense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispensed {
    /// Record the stock was taken from.
    pub medicine_id: i64,
    /// Stock left after the decrement.
    pub remaining_stock: i64,
    /// The audit entry written in the same transaction.
    pub entry: DispenseLogEntry,
}

// =============================================================================
// Report Lines
// =============================================================================

/// One line of the stock report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockLine {
    pub name: String,
    pub stock: i64,
}

impl StockLine {
    /// `Paracetamol: 80 left`
    pub fn report_line(&self) -> String {
        format!("{}: {} left", self.name, self.stock)
    }
}

/// One line of the expiry report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ExpiredLine {
    pub name: String,
    pub expiry_date: NaiveDate,
}

impl ExpiredLine {
    /// `Amoxicillin - Expired on 2024-12-31`
    pub fn report_line(&self) -> String {
        format!("{} - Expired on {}", self.name, self.expiry_date.format(crate::DATE_FORMAT))
    }
}
