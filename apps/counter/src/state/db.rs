//! # Database State
//!
//! Wraps the `Database` handle for use in counter commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn show_stock(db: &DbState) -> Result<Notification, ApiError> {
//!     let lines = db.inner().medicines().list_all().await?;
//!     ...
//! }
//! ```

use dispensary_db::Database;

/// Wrapper around `Database` handed to every command that touches the store.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database handle.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
