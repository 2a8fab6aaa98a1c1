//! # Counter Commands Module
//!
//! Every operator action, as a plain async function.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── inventory.rs  ◄─── register_medicine, show_stock, check_expiry
//! ├── dispense.rs   ◄─── dispense_medicine
//! └── logs.rs       ◄─── view_logs, export_logs
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Console reads the form fields                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn dispense_medicine(                                            │
//! │      db: &DbState,          ◄── Only the state it needs                 │
//! │      mirror: &MirrorLog,                                                │
//! │      clock: &CivilClock,                                                │
//! │      form: DispenseForm,    ◄── Raw text, as typed                      │
//! │  ) -> Result<DispenseReceipt, ApiError>                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Console renders the notification(s) and waits for the next action      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod dispense;
pub mod inventory;
pub mod logs;

pub use dispense::{dispense_medicine, DispenseForm, DispenseReceipt};
pub use inventory::{check_expiry, check_expiry_as_of, register_medicine, show_stock, RegisterForm};
pub use logs::{export_logs, view_logs};
