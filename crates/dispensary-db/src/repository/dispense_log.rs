//! # Dispense Log Repository
//!
//! Append-only audit trail of every successful dispense.
//!
//! ## Ordering
//! History is listed most recent first. Entries sharing the same
//! seconds-resolution timestamp fall back to insertion order (higher id first),
//! so the listing is stable across calls.
//!
//! Rows cannot be updated or deleted; the schema rejects both with a trigger.

use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use dispensary_core::{CivilTimestamp, DispenseLogEntry};

/// Raw row as stored; `date_taken` is civil-zone text.
#[derive(Debug, sqlx::FromRow)]
struct LogRow {
    id: i64,
    patient_name: String,
    medicine_name: String,
    quantity: i64,
    date_taken: String,
}

impl TryFrom<LogRow> for DispenseLogEntry {
    type Error = DbError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        let taken_at: CivilTimestamp = row.date_taken.parse().map_err(|_| {
            DbError::Internal(format!(
                "log entry {} has unreadable timestamp '{}'",
                row.id, row.date_taken
            ))
        })?;

        Ok(DispenseLogEntry {
            id: row.id,
            patient_name: row.patient_name,
            medicine_name: row.medicine_name,
            quantity: row.quantity,
            taken_at,
        })
    }
}

/// Inserts one log entry through any executor (pool or open transaction).
pub(crate) async fn insert_entry<'e, E>(
    executor: E,
    patient_name: &str,
    medicine_name: &str,
    quantity: i64,
    taken_at: CivilTimestamp,
) -> DbResult<DispenseLogEntry>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = sqlx::query(
        r#"
        INSERT INTO logs (patient_name, medicine_name, quantity, date_taken)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(patient_name)
    .bind(medicine_name)
    .bind(quantity)
    .bind(taken_at.to_string())
    .execute(executor)
    .await?
    .last_insert_rowid();

    Ok(DispenseLogEntry {
        id,
        patient_name: patient_name.to_string(),
        medicine_name: medicine_name.to_string(),
        quantity,
        taken_at,
    })
}

/// Repository for the dispense log.
#[derive(Debug, Clone)]
pub struct DispenseLogRepository {
    pool: SqlitePool,
}

impl DispenseLogRepository {
    /// Creates a new DispenseLogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DispenseLogRepository { pool }
    }

    /// Appends an entry.
    ///
    /// No business validation happens here; callers check stock first.
    /// Dispensing goes through [`DispensingRepository::record`] so the entry
    /// and the stock decrement commit together.
    ///
    /// [`DispensingRepository::record`]: crate::repository::dispensing::DispensingRepository::record
    pub async fn append(
        &self,
        patient_name: &str,
        medicine_name: &str,
        quantity: i64,
        taken_at: CivilTimestamp,
    ) -> DbResult<DispenseLogEntry> {
        debug!(patient = %patient_name, medicine = %medicine_name, quantity, "Appending log entry");
        insert_entry(&self.pool, patient_name, medicine_name, quantity, taken_at).await
    }

    /// Lists every entry, most recent first (ties: latest insert first).
    pub async fn list_all(&self) -> DbResult<Vec<DispenseLogEntry>> {
        let rows = sqlx::query_as::<_, LogRow>(
            r#"
            SELECT id, patient_name, medicine_name, quantity, date_taken
            FROM logs
            ORDER BY date_taken DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DispenseLogEntry::try_from).collect()
    }

    /// Counts log entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn ts(s: &str) -> CivilTimestamp {
        s.parse().unwrap()
    }

    async fn setup() -> (Database, DispenseLogRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.dispense_log();
        (db, repo)
    }

    #[tokio::test]
    async fn test_append_and_list() {
        let (_db, repo) = setup().await;

        let entry = repo
            .append("Juan", "Paracetamol", 20, ts("2025-01-01 10:00:00"))
            .await
            .unwrap();
        assert!(entry.id > 0);

        let all = repo.list_all().await.unwrap();
        assert_eq!(all, vec![entry]);
    }

    #[tokio::test]
    async fn test_list_is_most_recent_first() {
        let (_db, repo) = setup().await;

        repo.append("A", "Paracetamol", 1, ts("2025-01-01 08:00:00")).await.unwrap();
        repo.append("B", "Paracetamol", 1, ts("2025-01-03 08:00:00")).await.unwrap();
        repo.append("C", "Paracetamol", 1, ts("2025-01-02 08:00:00")).await.unwrap();

        let patients: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.patient_name)
            .collect();
        assert_eq!(patients, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn test_same_second_ties_break_by_insertion() {
        let (_db, repo) = setup().await;
        let at = ts("2025-01-01 10:00:00");

        repo.append("First", "Paracetamol", 1, at).await.unwrap();
        repo.append("Second", "Paracetamol", 1, at).await.unwrap();

        let first_call = repo.list_all().await.unwrap();
        let patients: Vec<&str> = first_call.iter().map(|e| e.patient_name.as_str()).collect();
        assert_eq!(patients, vec!["Second", "First"]);
        assert_eq!(first_call, repo.list_all().await.unwrap());
    }

    #[tokio::test]
    async fn test_log_is_append_only() {
        let (db, repo) = setup().await;
        repo.append("Juan", "Paracetamol", 20, ts("2025-01-01 10:00:00"))
            .await
            .unwrap();

        let update: DbError = sqlx::query("UPDATE logs SET quantity = 1")
            .execute(db.pool())
            .await
            .unwrap_err()
            .into();
        assert!(matches!(update, DbError::ConstraintViolation { .. }));

        let delete: DbError = sqlx::query("DELETE FROM logs")
            .execute(db.pool())
            .await
            .unwrap_err()
            .into();
        assert!(matches!(delete, DbError::ConstraintViolation { .. }));

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_default_timestamp_is_readable() {
        let (db, repo) = setup().await;

        // date_taken falls back to CURRENT_TIMESTAMP when omitted
        sqlx::query("INSERT INTO logs (patient_name, medicine_name, quantity) VALUES ('X', 'Y', 1)")
            .execute(db.pool())
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].patient_name, "X");
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected_by_schema() {
        let (_db, repo) = setup().await;
        let err = repo
            .append("Juan", "Paracetamol", 0, ts("2025-01-01 10:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));
    }
}
