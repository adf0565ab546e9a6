use chrono::{DateTime, Utc};
use shared::EventType;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub event_type: EventType,
    pub location: Option<String>,
}
