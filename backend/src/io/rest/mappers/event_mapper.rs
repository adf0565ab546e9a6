use shared::{Event as SharedEvent, EventRequest};

use crate::domain::commands::events::EventCommand;
use crate::domain::models::DomainEvent;

pub struct EventMapper;

impl EventMapper {
    pub fn to_dto(domain: DomainEvent) -> SharedEvent {
        SharedEvent {
            id: domain.id,
            title: domain.title,
            description: domain.description,
            date: domain.date,
            event_type: domain.event_type,
            location: domain.location,
        }
    }

    pub fn to_command(dto: EventRequest) -> EventCommand {
        EventCommand {
            title: dto.title,
            description: dto.description,
            date: dto.date,
            event_type: dto.event_type,
            location: dto.location,
        }
    }
}
