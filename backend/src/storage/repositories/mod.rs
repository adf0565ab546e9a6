// Repository modules
pub mod event_repository;
pub mod notice_repository;
pub mod payment_repository;
pub mod student_repository;

// Re-export repository types
pub use event_repository::EventRepository;
pub use notice_repository::NoticeRepository;
pub use payment_repository::PaymentRepository;
pub use student_repository::StudentRepository;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;

pub type StorageResult<T> = Result<T, sqlx::Error>;

/// First row of a result set read with `fetch_all`.
///
/// Single-row queries are still run with `fetch_all` so SQLite steps the
/// statement to completion. A half-stepped statement keeps its write
/// uncommitted and its read snapshot open on the pooled connection.
pub(crate) fn first_row(rows: Vec<SqliteRow>) -> Option<SqliteRow> {
    rows.into_iter().next()
}

/// Like `first_row`, for queries that always return a row
pub(crate) fn single_row(rows: Vec<SqliteRow>) -> StorageResult<SqliteRow> {
    first_row(rows).ok_or(sqlx::Error::RowNotFound)
}

/// Fixed-width RFC 3339 so that TEXT ordering matches chronological ordering
pub(crate) fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(raw: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

pub(crate) fn decode_optional_timestamp(raw: Option<String>) -> StorageResult<Option<DateTime<Utc>>> {
    raw.as_deref().map(decode_timestamp).transpose()
}

pub(crate) fn decode_enum<T>(raw: &str) -> StorageResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
