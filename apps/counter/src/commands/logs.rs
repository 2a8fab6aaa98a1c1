//! # Log Commands
//!
//! Dispense history and the mirror file export check.

use tracing::debug;

use crate::error::ApiError;
use crate::notification::Notification;
use crate::state::{DbState, MirrorLog};

/// Lists every dispense, most recent first.
///
/// An empty log is not an error; it gets its own "No Logs" notification.
pub async fn view_logs(db: &DbState) -> Result<Notification, ApiError> {
    debug!("view_logs command");

    let entries = db.inner().dispense_log().list_all().await?;

    if entries.is_empty() {
        return Ok(Notification::new(
            "No Logs",
            "No transactions have been recorded yet.",
        ));
    }

    Ok(Notification::report(
        "Medicine Logs",
        entries.iter().map(|e| e.history_line()),
        "",
    ))
}

/// Tells the operator where the mirror file is, if it exists.
///
/// Nothing is copied; the file is already kept up to date on every dispense.
pub async fn export_logs(mirror: &MirrorLog) -> Result<Notification, ApiError> {
    debug!(path = %mirror.path().display(), "export_logs command");

    if mirror.exists().await {
        Ok(Notification::new(
            "Export Success",
            format!("Log file saved in:\n{}", mirror.path().display()),
        ))
    } else {
        Ok(Notification::new("Export Failed", "No logs found to export."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::dispense::{dispense_medicine, DispenseForm};
    use crate::commands::inventory::{register_medicine, RegisterForm};
    use crate::commands::testing::counter;
    use chrono::NaiveDate;
    use dispensary_core::CivilClock;

    fn at(hour: u32, min: u32, sec: u32) -> CivilClock {
        CivilClock::fixed(
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(hour, min, sec)
                .unwrap(),
        )
    }

    fn give(patient: &str, quantity: &str) -> DispenseForm {
        DispenseForm {
            patient: patient.to_string(),
            medicine: "Paracetamol".to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[tokio::test]
    async fn test_view_logs_empty() {
        let c = counter().await;
        let note = view_logs(&c.db).await.unwrap();
        assert_eq!(
            note,
            Notification::new("No Logs", "No transactions have been recorded yet.")
        );
    }

    #[tokio::test]
    async fn test_view_logs_most_recent_first() {
        let c = counter().await;
        register_medicine(
            &c.db,
            RegisterForm {
                name: "Paracetamol".to_string(),
                stock: "100".to_string(),
                expiry: "2026-01-01".to_string(),
            },
        )
        .await
        .unwrap();

        dispense_medicine(&c.db, &c.mirror, &at(8, 0, 0), give("Juan", "20"))
            .await
            .unwrap();
        dispense_medicine(&c.db, &c.mirror, &at(10, 15, 0), give("Maria", "5"))
            .await
            .unwrap();
        // Rejected dispenses leave no trace
        dispense_medicine(&c.db, &c.mirror, &at(11, 0, 0), give("Pedro", "500"))
            .await
            .unwrap_err();

        let note = view_logs(&c.db).await.unwrap();
        assert_eq!(note.title, "Medicine Logs");
        assert_eq!(
            note.message,
            "2025-01-01 10:15:00 - Maria took 5 of Paracetamol\n\
             2025-01-01 08:00:00 - Juan took 20 of Paracetamol"
        );
        assert_eq!(note, view_logs(&c.db).await.unwrap());
    }

    #[tokio::test]
    async fn test_export_reports_path() {
        let c = counter().await;

        let note = export_logs(&c.mirror).await.unwrap();
        assert_eq!(note.title, "Export Success");
        assert_eq!(
            note.message,
            format!("Log file saved in:\n{}", c.mirror.path().display())
        );
    }

    #[tokio::test]
    async fn test_export_without_file() {
        let c = counter().await;
        std::fs::remove_file(c.mirror.path()).unwrap();

        let note = export_logs(&c.mirror).await.unwrap();
        assert_eq!(note, Notification::new("Export Failed", "No logs found to export."));
    }
}
