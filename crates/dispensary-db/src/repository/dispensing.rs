//! # Dispensing Repository
//!
//! Records a dispense: stock decrement and log entry in one transaction.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dispense Transaction                                 │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    1. SELECT first medicine WHERE name = ?     (missing → rejected)     │
//! │    2. stock >= quantity ?                      (short → rejected)       │
//! │    3. UPDATE medicines SET stock = stock - ?   (guarded: stock >= ?)    │
//! │    4. INSERT INTO logs (patient, medicine, quantity, date_taken)        │
//! │  COMMIT ← Both writes land or neither does                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected or failed dispense drops the transaction, which rolls it back.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::dispense_log::insert_entry;
use crate::repository::medicine::{DECREMENT_STOCK, SELECT_BY_NAME};
use dispensary_core::{CivilTimestamp, CoreError, DispenseRequest, Dispensed, Medicine};

/// Repository for atomic dispense operations.
#[derive(Debug, Clone)]
pub struct DispensingRepository {
    pool: SqlitePool,
}

impl DispensingRepository {
    /// Creates a new DispensingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DispensingRepository { pool }
    }

    /// Dispenses `request.quantity` units of the named medicine to the patient.
    ///
    /// ## Returns
    /// * `Ok(Dispensed)` - Stock decremented and log entry stored
    /// * `Err(DbError::Rejected(MedicineNotFound))` - No record with that name
    /// * `Err(DbError::Rejected(InsufficientStock))` - Not enough units
    ///
    /// On any error nothing is written.
    pub async fn record(
        &self,
        request: &DispenseRequest,
        taken_at: CivilTimestamp,
    ) -> DbResult<Dispensed> {
        debug!(
            patient = %request.patient_name,
            medicine = %request.medicine_name,
            quantity = request.quantity,
            "Recording dispense"
        );

        if request.quantity <= 0 {
            return Err(DbError::ConstraintViolation {
                message: "quantity must be positive".to_string(),
            });
        }

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let medicine = sqlx::query_as::<_, Medicine>(SELECT_BY_NAME)
            .bind(&request.medicine_name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::MedicineNotFound(request.medicine_name.clone()))?;

        if !medicine.can_dispense(request.quantity) {
            warn!(
                medicine = %medicine.name,
                available = medicine.stock,
                requested = request.quantity,
                "Insufficient stock"
            );
            return Err(CoreError::InsufficientStock {
                medicine: medicine.name,
                available: medicine.stock,
                requested: request.quantity,
            }
            .into());
        }

        let updated = sqlx::query(DECREMENT_STOCK)
            .bind(medicine.id)
            .bind(request.quantity)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", medicine.id.to_string()));
        }

        let entry = insert_entry(
            &mut *tx,
            &request.patient_name,
            &medicine.name,
            request.quantity,
            taken_at,
        )
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        let remaining_stock = medicine.stock - request.quantity;
        info!(
            medicine = %medicine.name,
            remaining = remaining_stock,
            log_id = entry.id,
            "Dispense recorded"
        );

        Ok(Dispensed {
            medicine_id: medicine.id,
            remaining_stock,
            entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use dispensary_core::NewMedicine;

    fn ts(s: &str) -> CivilTimestamp {
        s.parse().unwrap()
    }

    fn request(patient: &str, medicine: &str, quantity: i64) -> DispenseRequest {
        DispenseRequest {
            patient_name: patient.to_string(),
            medicine_name: medicine.to_string(),
            quantity,
        }
    }

    async fn setup_with_paracetamol() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.medicines()
            .register(&NewMedicine {
                name: "Paracetamol".to_string(),
                stock: 100,
                expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            })
            .await
            .unwrap();
        db
    }

    async fn stock_of(db: &Database, name: &str) -> i64 {
        db.medicines().find_by_name(name).await.unwrap().unwrap().stock
    }

    #[tokio::test]
    async fn test_dispense_decrements_and_logs() {
        let db = setup_with_paracetamol().await;
        let at = ts("2025-01-01 09:30:00");

        let dispensed = db
            .dispensing()
            .record(&request("Juan", "Paracetamol", 20), at)
            .await
            .unwrap();

        assert_eq!(dispensed.remaining_stock, 80);
        assert_eq!(dispensed.entry.patient_name, "Juan");
        assert_eq!(dispensed.entry.quantity, 20);
        assert_eq!(dispensed.entry.taken_at, at);

        assert_eq!(stock_of(&db, "Paracetamol").await, 80);
        assert_eq!(db.dispense_log().list_all().await.unwrap(), vec![dispensed.entry]);
    }

    #[tokio::test]
    async fn test_insufficient_stock_writes_nothing() {
        let db = setup_with_paracetamol().await;
        let repo = db.dispensing();

        repo.record(&request("Juan", "Paracetamol", 20), ts("2025-01-01 09:30:00"))
            .await
            .unwrap();

        let err = repo
            .record(&request("Maria", "Paracetamol", 90), ts("2025-01-01 09:31:00"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Rejected(CoreError::InsufficientStock {
                available: 80,
                requested: 90,
                ..
            })
        ));

        assert_eq!(stock_of(&db, "Paracetamol").await, 80);
        assert_eq!(db.dispense_log().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_exact_stock_can_be_dispensed() {
        let db = setup_with_paracetamol().await;

        let dispensed = db
            .dispensing()
            .record(&request("Juan", "Paracetamol", 100), ts("2025-01-01 09:30:00"))
            .await
            .unwrap();

        assert_eq!(dispensed.remaining_stock, 0);
        assert_eq!(stock_of(&db, "Paracetamol").await, 0);
    }

    #[tokio::test]
    async fn test_unknown_medicine_writes_nothing() {
        let db = setup_with_paracetamol().await;

        let err = db
            .dispensing()
            .record(&request("Juan", "Aspirin", 1), ts("2025-01-01 09:30:00"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, DbError::Rejected(CoreError::MedicineNotFound(ref n)) if n == "Aspirin")
        );
        assert_eq!(db.dispense_log().count().await.unwrap(), 0);
        assert_eq!(stock_of(&db, "Paracetamol").await, 100);
    }

    #[tokio::test]
    async fn test_non_positive_quantity_is_rejected() {
        let db = setup_with_paracetamol().await;

        let err = db
            .dispensing()
            .record(&request("Juan", "Paracetamol", 0), ts("2025-01-01 09:30:00"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ConstraintViolation { .. }));
        assert_eq!(db.dispense_log().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_log_insert_rolls_back_decrement() {
        let db = setup_with_paracetamol().await;

        // Make the second write of the transaction fail
        sqlx::query(
            "CREATE TRIGGER fail_insert BEFORE INSERT ON logs \
             BEGIN SELECT RAISE(ABORT, 'disk on fire'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db
            .dispensing()
            .record(&request("Juan", "Paracetamol", 20), ts("2025-01-01 09:30:00"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::QueryFailed(_)));
        assert_eq!(stock_of(&db, "Paracetamol").await, 100);
    }

    #[tokio::test]
    async fn test_log_records_stored_name() {
        let db = setup_with_paracetamol().await;

        let dispensed = db
            .dispensing()
            .record(&request("Juan", "Paracetamol", 5), ts("2025-01-01 09:30:00"))
            .await
            .unwrap();

        assert_eq!(dispensed.entry.medicine_name, "Paracetamol");
        assert_eq!(
            dispensed.entry.history_line(),
            "2025-01-01 09:30:00 - Juan took 5 of Paracetamol"
        );
    }
}
