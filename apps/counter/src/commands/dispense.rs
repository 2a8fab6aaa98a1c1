//! # Dispense Command
//!
//! Giving medicine to a patient.
//!
//! ## Dispense Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Give Medicine                                        │
//! │                                                                         │
//! │  1. Form complete? quantity > 0?     no ──► "Invalid input or           │
//! │                                              medication not found!"     │
//! │  2. One transaction:                                                    │
//! │     medicine exists?                 no ──► "Invalid input or           │
//! │                                              medication not found!"     │
//! │     stock >= quantity?               no ──► "Insufficient stock!"       │
//! │     decrement stock + append log entry                                  │
//! │  3. Append mirror line               fail ──► "File Error" (dispense    │
//! │                                                stays committed)         │
//! │  4. "Success ... Remaining stock: N."                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::notification::Notification;
use crate::state::{DbState, MirrorLog};
use dispensary_core::{CivilClock, DispenseInput, Dispensed};

/// Raw fields of the "Give Medicine" form.
#[derive(Debug, Clone, Default)]
pub struct DispenseForm {
    pub patient: String,
    pub medicine: String,
    pub quantity: String,
}

/// Outcome of a committed dispense.
#[derive(Debug, Clone)]
pub struct DispenseReceipt {
    pub dispensed: Dispensed,

    /// Set when the mirror line could not be written.
    pub file_error: Option<ApiError>,
}

impl DispenseReceipt {
    /// "Success" notification with the remaining stock.
    pub fn success(&self) -> Notification {
        let entry = &self.dispensed.entry;
        Notification::success(format!(
            "{} took {} of {}. Remaining stock: {}.",
            entry.patient_name, entry.quantity, entry.medicine_name, self.dispensed.remaining_stock
        ))
    }

    /// Notifications in display order: the file error (if any), then success.
    pub fn notifications(&self) -> Vec<Notification> {
        self.file_error
            .iter()
            .map(ApiError::notification)
            .chain(std::iter::once(self.success()))
            .collect()
    }
}

/// Dispenses medicine to a patient.
///
/// The stock decrement and the log entry commit together. The mirror line is
/// written afterwards with the same timestamp; if that fails the dispense
/// still stands and the receipt carries the file error.
pub async fn dispense_medicine(
    db: &DbState,
    mirror: &MirrorLog,
    clock: &CivilClock,
    form: DispenseForm,
) -> Result<DispenseReceipt, ApiError> {
    debug!(
        patient = %form.patient,
        medicine = %form.medicine,
        quantity = %form.quantity,
        "dispense_medicine command"
    );

    let request = DispenseInput::new(&form.patient, &form.medicine, &form.quantity)
        .parse()
        .map_err(|e| {
            debug!(error = %e, "Dispense form rejected");
            ApiError::invalid_dispense()
        })?;

    let dispensed = db.inner().dispensing().record(&request, clock.now()).await?;

    let file_error = match mirror.append(&dispensed.entry).await {
        Ok(()) => None,
        Err(e) => {
            warn!(error = %e, "Dispense recorded but mirror file not updated");
            Some(ApiError::from(e))
        }
    };

    Ok(DispenseReceipt {
        dispensed,
        file_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::inventory::{register_medicine, show_stock, RegisterForm};
    use crate::commands::testing::{counter, Counter};
    use crate::error::ErrorCode;

    fn give(patient: &str, medicine: &str, quantity: &str) -> DispenseForm {
        DispenseForm {
            patient: patient.to_string(),
            medicine: medicine.to_string(),
            quantity: quantity.to_string(),
        }
    }

    async fn with_paracetamol() -> Counter {
        let c = counter().await;
        register_medicine(
            &c.db,
            RegisterForm {
                name: "Paracetamol".to_string(),
                stock: "100".to_string(),
                expiry: "2025-01-01".to_string(),
            },
        )
        .await
        .unwrap();
        c
    }

    async fn log_count(c: &Counter) -> i64 {
        c.db.inner().dispense_log().count().await.unwrap()
    }

    #[tokio::test]
    async fn test_dispense_then_insufficient() {
        let c = with_paracetamol().await;

        let receipt = dispense_medicine(
            &c.db,
            &c.mirror,
            &c.clock,
            give("Juan", "Paracetamol", "20"),
        )
        .await
        .unwrap();
        assert_eq!(
            receipt.notifications(),
            vec![Notification::success(
                "Juan took 20 of Paracetamol. Remaining stock: 80."
            )]
        );
        assert_eq!(log_count(&c).await, 1);

        let err = dispense_medicine(&c.db, &c.mirror, &c.clock, give("Maria", "Paracetamol", "90"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.notification(), Notification::new("Error", "Insufficient stock!"));

        let stock = show_stock(&c.db).await.unwrap();
        assert_eq!(stock.message, "Paracetamol: 80 left");
        assert_eq!(log_count(&c).await, 1);
    }

    #[tokio::test]
    async fn test_log_and_mirror_share_timestamp() {
        let c = with_paracetamol().await;

        let receipt = dispense_medicine(
            &c.db,
            &c.mirror,
            &c.clock,
            give("Juan", "Paracetamol", "20"),
        )
        .await
        .unwrap();
        assert_eq!(receipt.dispensed.entry.taken_at.to_string(), "2025-01-01 09:30:00");

        let logs = c.db.inner().dispense_log().list_all().await.unwrap();
        assert_eq!(logs[0].taken_at, receipt.dispensed.entry.taken_at);

        let contents = std::fs::read_to_string(c.mirror.path()).unwrap();
        assert_eq!(
            contents,
            "Medicine Dispense Log\n2025-01-01 09:30:00 - Juan took 20 Paracetamol\n"
        );
    }

    #[tokio::test]
    async fn test_invalid_forms_share_one_message() {
        let c = with_paracetamol().await;

        for form in [
            give("", "Paracetamol", "1"),
            give("Juan", "", "1"),
            give("Juan", "Paracetamol", ""),
            give("Juan", "Paracetamol", "0"),
            give("Juan", "Paracetamol", "-4"),
            give("Juan", "Paracetamol", "two"),
            give("Juan", "Aspirin", "1"),
        ] {
            let err = dispense_medicine(&c.db, &c.mirror, &c.clock, form).await.unwrap_err();
            assert_eq!(
                err.notification(),
                Notification::new("Error", "Invalid input or medication not found!")
            );
        }

        assert_eq!(log_count(&c).await, 0);
        assert_eq!(show_stock(&c.db).await.unwrap().message, "Paracetamol: 100 left");
    }

    #[tokio::test]
    async fn test_mirror_failure_keeps_dispense() {
        let c = with_paracetamol().await;
        let broken = MirrorLog::open(c.dir.path().join("missing").join("medicine_log.txt")).await;

        let receipt = dispense_medicine(&c.db, &broken, &c.clock, give("Juan", "Paracetamol", "20"))
            .await
            .unwrap();

        let notes = receipt.notifications();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "File Error");
        assert!(notes[0].message.starts_with("Could not write to log file:\n"));
        assert_eq!(notes[1].message, "Juan took 20 of Paracetamol. Remaining stock: 80.");

        assert_eq!(log_count(&c).await, 1);
        assert_eq!(show_stock(&c.db).await.unwrap().message, "Paracetamol: 80 left");
    }

    #[tokio::test]
    async fn test_names_are_trimmed() {
        let c = with_paracetamol().await;

        let receipt = dispense_medicine(
            &c.db,
            &c.mirror,
            &c.clock,
            give(" Juan ", " Paracetamol ", " 5 "),
        )
        .await
        .unwrap();

        assert_eq!(receipt.dispensed.entry.patient_name, "Juan");
        assert_eq!(receipt.dispensed.remaining_stock, 95);
    }
}
