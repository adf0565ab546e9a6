use shared::{Notice as SharedNotice, NoticeRequest};

use crate::domain::commands::notices::NoticeCommand;
use crate::domain::models::DomainNotice;

pub struct NoticeMapper;

impl NoticeMapper {
    pub fn to_dto(domain: DomainNotice) -> SharedNotice {
        SharedNotice {
            id: domain.id,
            title: domain.title,
            content: domain.content,
            priority: domain.priority,
            created_at: domain.created_at,
            expires_at: domain.expires_at,
        }
    }

    pub fn to_command(dto: NoticeRequest) -> NoticeCommand {
        NoticeCommand {
            title: dto.title,
            content: dto.content,
            priority: dto.priority,
            expires_at: dto.expires_at,
        }
    }
}
