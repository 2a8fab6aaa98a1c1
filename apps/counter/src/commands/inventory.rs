//! # Inventory Commands
//!
//! Registering medicines and the two inventory reports.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::notification::Notification;
use crate::state::DbState;
use dispensary_core::{CivilClock, RegisterInput};

/// Raw fields of the "Add Medicine" form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub stock: String,
    /// `YYYY-MM-DD`
    pub expiry: String,
}

/// Registers a new medicine record.
///
/// ## Returns
/// "Success" with the stored name and stock, or "Fill all fields!" when any
/// field is empty. Duplicate names are accepted.
pub async fn register_medicine(db: &DbState, form: RegisterForm) -> Result<Notification, ApiError> {
    debug!(name = %form.name, "register_medicine command");

    let medicine = RegisterInput::new(&form.name, &form.stock, &form.expiry).parse()?;
    let stored = db.inner().medicines().register(&medicine).await?;

    info!(id = stored.id, name = %stored.name, stock = stored.stock, "Medicine registered");

    Ok(Notification::success(format!(
        "{} added with {} stock!",
        stored.name, stored.stock
    )))
}

/// Lists every medicine with its stock, in registration order.
pub async fn show_stock(db: &DbState) -> Result<Notification, ApiError> {
    debug!("show_stock command");

    let lines = db.inner().medicines().list_all().await?;

    Ok(Notification::report(
        "Medicine Stock",
        lines.iter().map(|l| l.report_line()),
        "No medicines available.",
    ))
}

/// Lists medicines expired as of today in the counter's civil zone.
pub async fn check_expiry(db: &DbState, clock: &CivilClock) -> Result<Notification, ApiError> {
    check_expiry_as_of(db, clock.today()).await
}

/// Lists medicines whose expiry date is on or before `as_of`.
pub async fn check_expiry_as_of(db: &DbState, as_of: NaiveDate) -> Result<Notification, ApiError> {
    debug!(%as_of, "check_expiry command");

    let lines = db.inner().medicines().list_expired_as_of(as_of).await?;

    Ok(Notification::report(
        "Expiry Check",
        lines.iter().map(|l| l.report_line()),
        "No expired medicines.",
    ))
}
