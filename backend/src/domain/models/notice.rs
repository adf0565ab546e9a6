use chrono::{DateTime, Utc};
use shared::Priority;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainNotice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}
