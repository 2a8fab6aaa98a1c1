//! # Medicine Repository
//!
//! Durable bookkeeping of medicine records and stock levels.
//!
//! ## Duplicate Names
//! Names are not unique. Lookups by name resolve to the record with the lowest
//! id (the first one registered); the others are only visible in reports.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use dispensary_core::{CoreError, ExpiredLine, Medicine, NewMedicine, StockLine};

pub(crate) const SELECT_BY_NAME: &str = r#"
    SELECT id, name, stock, expiry_date
    FROM medicines
    WHERE name = ?1
    ORDER BY id
    LIMIT 1
"#;

/// Stock decrement guarded against going below zero.
pub(crate) const DECREMENT_STOCK: &str = r#"
    UPDATE medicines
    SET stock = stock - ?2
    WHERE id = ?1 AND stock >= ?2
"#;

/// Repository for medicine records.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.medicines();
/// let id = repo.register(&new_medicine).await?;
/// let stock = repo.list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Inserts a new medicine record.
    ///
    /// ## Returns
    /// The stored record with its auto-assigned id.
    pub async fn register(&self, medicine: &NewMedicine) -> DbResult<Medicine> {
        debug!(name = %medicine.name, stock = medicine.stock, "Registering medicine");

        let id = sqlx::query(
            r#"
            INSERT INTO medicines (name, stock, expiry_date)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&medicine.name)
        .bind(medicine.stock)
        .bind(medicine.expiry_date)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Medicine {
            id,
            name: medicine.name.clone(),
            stock: medicine.stock,
            expiry_date: medicine.expiry_date,
        })
    }

    /// Gets the first record registered under `name` (exact match).
    ///
    /// ## Returns
    /// * `Ok(Some(Medicine))` - Record found
    /// * `Ok(None)` - No record with that name
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Medicine>> {
        let medicine = sqlx::query_as::<_, Medicine>(SELECT_BY_NAME)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(medicine)
    }

    /// Takes `quantity` units from the first record named `name`.
    ///
    /// Nothing is written unless the record exists and holds at least
    /// `quantity` units.
    ///
    /// ## Returns
    /// The new stock level.
    pub async fn decrement_stock(&self, name: &str, quantity: i64) -> DbResult<i64> {
        debug!(name = %name, quantity, "Decrementing stock");

        if quantity <= 0 {
            return Err(DbError::ConstraintViolation {
                message: "quantity must be positive".to_string(),
            });
        }

        let medicine = self
            .find_by_name(name)
            .await?
            .ok_or_else(|| CoreError::MedicineNotFound(name.to_string()))?;

        if !medicine.can_dispense(quantity) {
            return Err(CoreError::InsufficientStock {
                medicine: medicine.name,
                available: medicine.stock,
                requested: quantity,
            }
            .into());
        }

        let result = sqlx::query(DECREMENT_STOCK)
            .bind(medicine.id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", name));
        }

        Ok(medicine.stock - quantity)
    }

    /// Lists every record as (name, stock), in registration order.
    pub async fn list_all(&self) -> DbResult<Vec<StockLine>> {
        let lines = sqlx::query_as::<_, StockLine>("SELECT name, stock FROM medicines ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(lines)
    }

    /// Lists records expiring on or before `date`.
    ///
    /// The boundary is inclusive: a medicine expiring on `date` is listed.
    /// Ordered by expiry date, then registration order.
    pub async fn list_expired_as_of(&self, date: NaiveDate) -> DbResult<Vec<ExpiredLine>> {
        debug!(%date, "Listing expired medicines");

        let lines = sqlx::query_as::<_, ExpiredLine>(
            r#"
            SELECT name, expiry_date
            FROM medicines
            WHERE expiry_date <= ?1
            ORDER BY expiry_date, id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Counts medicine records (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
