use chrono::{DateTime, Utc};
use shared::Priority;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{
    decode_enum, decode_optional_timestamp, decode_timestamp, encode_timestamp, first_row,
    single_row, StorageResult,
};
use crate::domain::models::DomainNotice;
use crate::storage::connection::DbConnection;

/// Fields written by create and update
#[derive(Debug, Clone)]
pub struct NoticeFields {
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct NoticeRepository {
    db: DbConnection,
}

impl NoticeRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_notice(
        &self,
        fields: &NoticeFields,
        created_at: DateTime<Utc>,
    ) -> StorageResult<DomainNotice> {
        let rows = sqlx::query(
            r#"
            INSERT INTO notices (title, content, priority, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, content, priority, created_at, expires_at
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(fields.priority.as_str())
        .bind(encode_timestamp(&created_at))
        .bind(fields.expires_at.as_ref().map(encode_timestamp))
        .fetch_all(self.db.pool())
        .await?;
        let row = single_row(rows)?;

        Self::map_row(&row)
    }

    pub async fn get_notice(&self, notice_id: i64) -> StorageResult<Option<DomainNotice>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, priority, created_at, expires_at
            FROM notices
            WHERE id = ?
            "#,
        )
        .bind(notice_id)
        .fetch_all(self.db.pool())
        .await?;
        let row = first_row(rows);

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Newest first
    pub async fn list_notices(&self) -> StorageResult<Vec<DomainNotice>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, priority, created_at, expires_at
            FROM notices
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Returns the updated notice, or None if no row has this id
    pub async fn update_notice(
        &self,
        notice_id: i64,
        fields: &NoticeFields,
    ) -> StorageResult<Option<DomainNotice>> {
        let rows = sqlx::query(
            r#"
            UPDATE notices
            SET title = ?, content = ?, priority = ?, expires_at = ?
            WHERE id = ?
            RETURNING id, title, content, priority, created_at, expires_at
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(fields.priority.as_str())
        .bind(fields.expires_at.as_ref().map(encode_timestamp))
        .bind(notice_id)
        .fetch_all(self.db.pool())
        .await?;
        let row = first_row(rows);

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Returns true if a row was deleted
    pub async fn delete_notice(&self, notice_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM notices WHERE id = ?")
            .bind(notice_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn map_row(row: &SqliteRow) -> StorageResult<DomainNotice> {
        Ok(DomainNotice {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            priority: decode_enum(row.try_get("priority")?)?,
            created_at: decode_timestamp(row.try_get("created_at")?)?,
            expires_at: decode_optional_timestamp(row.try_get("expires_at")?)?,
        })
    }
}
