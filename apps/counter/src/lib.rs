//! # Dispensary Counter Library
//!
//! Core library for the pharmacy counter application.
//! This is the main entry point that opens resources and runs the menu loop.
//!
//! ## Module Organization
//! ```text
//! dispensary_counter/
//! ├── lib.rs           ◄─── You are here (startup & shutdown)
//! ├── config.rs        ◄─── counter.toml over built-in defaults
//! ├── console.rs       ◄─── Menu loop over stdin/stdout
//! ├── notification.rs  ◄─── Title + message shown after each action
//! ├── state/
//! │   ├── mod.rs       ◄─── State type exports
//! │   ├── db.rs        ◄─── Database state wrapper
//! │   └── mirror.rs    ◄─── Plain-text mirror of the dispense log
//! ├── commands/
//! │   ├── mod.rs       ◄─── Command exports
//! │   ├── inventory.rs ◄─── Register, stock and expiry reports
//! │   ├── dispense.rs  ◄─── Give medicine
//! │   └── logs.rs      ◄─── History and export
//! └── error.rs         ◄─── API error type for commands
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod notification;
pub mod state;

use std::error::Error;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use console::Console;
use dispensary_db::{Database, DbConfig};
use state::{DbState, MirrorLog};

/// Runs the counter until the operator quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Counter Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → counter.toml (unreadable file: defaults)               │
/// │                                                                         │
/// │  3. Open Database ────────────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  4. Open Mirror File ─────────────────────────────────────────────────► │
/// │     • Header written if absent; failure only logged                     │
/// │                                                                         │
/// │  5. Menu Loop ────────────────────────────────────────────────────────► │
/// │     • One action at a time until quit or end of input                   │
/// │                                                                         │
/// │  6. Close Database                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();

    info!("Starting dispensary counter");

    let config = AppConfig::load_or_default(None);
    let clock = config.clock()?;

    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    let mirror = MirrorLog::open(config.mirror_path()?).await;

    let db_state = DbState::new(db.clone());
    let mut console = Console::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        db_state,
        mirror,
        clock,
    )
    .clinic_name(config.clinic.name.clone());

    let outcome = console.run().await;

    db.close().await;
    outcome?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with the menu on stdout.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=dispensary=trace` - Show trace for dispensary crates only
/// - Default: warnings, plus INFO from the dispensary crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,dispensary=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
