//! # Dispensary Counter Entry Point
//!
//! The actual setup is in lib.rs for better testability.
//!
//! The runtime is single-threaded: every action is awaited to completion
//! before the next input line is read.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match dispensary_counter::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Counter stopped");
            eprintln!("dispensary-counter: {}", e);
            ExitCode::FAILURE
        }
    }
}
