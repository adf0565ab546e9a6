use chrono::{DateTime, Utc};
use shared::PaymentStatus;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::collections::HashMap;

use super::{
    decode_enum, decode_optional_timestamp, encode_timestamp, single_row, StorageResult,
};
use crate::domain::models::{DomainPayment, PaymentPeriod};
use crate::storage::connection::DbConnection;

/// Repository for per-period payment rows
#[derive(Clone)]
pub struct PaymentRepository {
    db: DbConnection,
}

impl PaymentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Find-or-create the row for (student, period) and set its status in one statement.
    ///
    /// The UNIQUE(student_id, month, year) index turns a concurrent second insert
    /// into an update of the same row. Returns the row id.
    pub async fn upsert_payment(
        &self,
        student_id: i64,
        period: PaymentPeriod,
        status: PaymentStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> StorageResult<i64> {
        let rows = sqlx::query(
            r#"
            INSERT INTO payments (student_id, month, year, status, paid_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (student_id, month, year) DO UPDATE
            SET status = excluded.status, paid_at = excluded.paid_at
            RETURNING id
            "#,
        )
        .bind(student_id)
        .bind(period.month)
        .bind(period.year)
        .bind(status.as_str())
        .bind(paid_at.as_ref().map(encode_timestamp))
        .fetch_all(self.db.pool())
        .await?;
        let row = single_row(rows)?;

        row.try_get("id")
    }

    /// All payments of one student, year descending then month ascending
    pub async fn list_for_student(&self, student_id: i64) -> StorageResult<Vec<DomainPayment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, student_id, month, year, status, paid_at
            FROM payments
            WHERE student_id = ?
            ORDER BY year DESC, month ASC
            "#,
        )
        .bind(student_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Every payment grouped by student id, each group in display order
    pub async fn list_grouped_by_student(&self) -> StorageResult<HashMap<i64, Vec<DomainPayment>>> {
        let rows = sqlx::query(
            r#"
            SELECT id, student_id, month, year, status, paid_at
            FROM payments
            ORDER BY student_id ASC, year DESC, month ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut grouped: HashMap<i64, Vec<DomainPayment>> = HashMap::new();
        for row in &rows {
            let payment = Self::map_row(row)?;
            grouped.entry(payment.student_id).or_default().push(payment);
        }
        Ok(grouped)
    }

    /// Number of rows stored for one (student, period) key
    pub async fn count_for_period(&self, student_id: i64, period: PaymentPeriod) -> StorageResult<i64> {
        let rows = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM payments
            WHERE student_id = ? AND month = ? AND year = ?
            "#,
        )
        .bind(student_id)
        .bind(period.month)
        .bind(period.year)
        .fetch_all(self.db.pool())
        .await?;
        let row = single_row(rows)?;

        row.try_get("count")
    }

    /// Total number of payment rows
    pub async fn count_all(&self) -> StorageResult<i64> {
        let rows = sqlx::query("SELECT COUNT(*) AS count FROM payments")
            .fetch_all(self.db.pool())
            .await?;
        let row = single_row(rows)?;

        row.try_get("count")
    }

    fn map_row(row: &SqliteRow) -> StorageResult<DomainPayment> {
        let month: u32 = row.try_get("month")?;
        let year: i32 = row.try_get("year")?;
        Ok(DomainPayment {
            id: row.try_get("id")?,
            student_id: row.try_get("student_id")?,
            period: PaymentPeriod { month, year },
            status: decode_enum(row.try_get("status")?)?,
            paid_at: decode_optional_timestamp(row.try_get("paid_at")?)?,
        })
    }
}
