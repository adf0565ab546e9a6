use tracing::{info, warn};

use super::commands::events::EventCommand;
use super::error::{DomainError, DomainResult};
use super::models::DomainEvent;
use super::validation::{parse_event_date, required_text};
use crate::storage::repositories::event_repository::EventFields;
use crate::storage::EventRepository;

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 5000;

/// Team calendar events
#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
}

impl EventService {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    pub async fn list_events(&self) -> DomainResult<Vec<DomainEvent>> {
        Ok(self.events.list_events().await?)
    }

    pub async fn create_event(&self, command: EventCommand) -> DomainResult<DomainEvent> {
        let fields = Self::validate(command)?;
        let event = self.events.create_event(&fields).await?;
        info!("Created event {}: {} on {}", event.id, event.title, event.date);
        Ok(event)
    }

    pub async fn update_event(&self, event_id: i64, command: EventCommand) -> DomainResult<DomainEvent> {
        let fields = Self::validate(command)?;
        self.events
            .update_event(event_id, &fields)
            .await?
            .ok_or_else(|| Self::missing(event_id))
    }

    pub async fn delete_event(&self, event_id: i64) -> DomainResult<()> {
        if self.events.delete_event(event_id).await? {
            info!("Deleted event {}", event_id);
            Ok(())
        } else {
            Err(Self::missing(event_id))
        }
    }

    fn validate(command: EventCommand) -> DomainResult<EventFields> {
        let location = command
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        Ok(EventFields {
            title: required_text(&command.title, "Title", MAX_TITLE_LEN)?,
            description: required_text(&command.description, "Description", MAX_DESCRIPTION_LEN)?,
            date: parse_event_date(&command.date)?,
            event_type: command.event_type,
            location,
        })
    }

    fn missing(event_id: i64) -> DomainError {
        warn!("Event not found: {}", event_id);
        DomainError::not_found(format!("Event not found: {event_id}"))
    }
}
