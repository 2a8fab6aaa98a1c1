//! # State Module
//!
//! Process-wide resources of the counter, opened once at startup and released
//! at shutdown.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────┐       │
//! │  │   DbState    │  │    MirrorLog     │  │  CivilClock (core)   │       │
//! │  │              │  │                  │  │                      │       │
//! │  │  Database    │  │  medicine_log    │  │  Asia/Manila         │       │
//! │  │  (SQLite)    │  │  .txt            │  │  UTC+08:00           │       │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────┘       │
//! │                                                                         │
//! │  Each command takes only the state it needs. One action runs at a time, │
//! │  so none of these need locking.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod db;
mod mirror;

pub use db::DbState;
pub use mirror::{MirrorError, MirrorLog};
