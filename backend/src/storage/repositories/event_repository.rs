use chrono::{DateTime, Utc};
use shared::EventType;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{
    decode_enum, decode_timestamp, encode_timestamp, first_row, single_row, StorageResult,
};
use crate::domain::models::DomainEvent;
use crate::storage::connection::DbConnection;

/// Fields written by create and update
#[derive(Debug, Clone)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub event_type: EventType,
    pub location: Option<String>,
}

#[derive(Clone)]
pub struct EventRepository {
    db: DbConnection,
}

impl EventRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_event(&self, fields: &EventFields) -> StorageResult<DomainEvent> {
        let rows = sqlx::query(
            r#"
            INSERT INTO events (title, description, date, event_type, location)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, description, date, event_type, location
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(encode_timestamp(&fields.date))
        .bind(fields.event_type.as_str())
        .bind(fields.location.as_deref())
        .fetch_all(self.db.pool())
        .await?;
        let row = single_row(rows)?;

        Self::map_row(&row)
    }

    pub async fn get_event(&self, event_id: i64) -> StorageResult<Option<DomainEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, date, event_type, location
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.pool())
        .await?;
        let row = first_row(rows);

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Soonest first
    pub async fn list_events(&self) -> StorageResult<Vec<DomainEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, date, event_type, location
            FROM events
            ORDER BY date ASC, id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Returns the updated event, or None if no row has this id
    pub async fn update_event(
        &self,
        event_id: i64,
        fields: &EventFields,
    ) -> StorageResult<Option<DomainEvent>> {
        let rows = sqlx::query(
            r#"
            UPDATE events
            SET title = ?, description = ?, date = ?, event_type = ?, location = ?
            WHERE id = ?
            RETURNING id, title, description, date, event_type, location
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(encode_timestamp(&fields.date))
        .bind(fields.event_type.as_str())
        .bind(fields.location.as_deref())
        .bind(event_id)
        .fetch_all(self.db.pool())
        .await?;
        let row = first_row(rows);

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Returns true if a row was deleted
    pub async fn delete_event(&self, event_id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(event_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn map_row(row: &SqliteRow) -> StorageResult<DomainEvent> {
        Ok(DomainEvent {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            date: decode_timestamp(row.try_get("date")?)?,
            event_type: decode_enum(row.try_get("event_type")?)?,
            location: row.try_get("location")?,
        })
    }
}
