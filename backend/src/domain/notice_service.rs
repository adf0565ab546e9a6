use chrono::Utc;
use tracing::{info, warn};

use super::commands::notices::NoticeCommand;
use super::error::{DomainError, DomainResult};
use super::models::DomainNotice;
use super::validation::required_text;
use crate::storage::repositories::notice_repository::NoticeFields;
use crate::storage::NoticeRepository;

const MAX_TITLE_LEN: usize = 200;
const MAX_CONTENT_LEN: usize = 5000;

/// Team notice board
#[derive(Clone)]
pub struct NoticeService {
    notices: NoticeRepository,
}

impl NoticeService {
    pub fn new(notices: NoticeRepository) -> Self {
        Self { notices }
    }

    pub async fn list_notices(&self) -> DomainResult<Vec<DomainNotice>> {
        Ok(self.notices.list_notices().await?)
    }

    pub async fn create_notice(&self, command: NoticeCommand) -> DomainResult<DomainNotice> {
        let fields = Self::validate(command)?;
        let notice = self.notices.create_notice(&fields, Utc::now()).await?;
        info!("Created notice {}: {}", notice.id, notice.title);
        Ok(notice)
    }

    pub async fn update_notice(&self, notice_id: i64, command: NoticeCommand) -> DomainResult<DomainNotice> {
        let fields = Self::validate(command)?;
        self.notices
            .update_notice(notice_id, &fields)
            .await?
            .ok_or_else(|| Self::missing(notice_id))
    }

    pub async fn delete_notice(&self, notice_id: i64) -> DomainResult<()> {
        if self.notices.delete_notice(notice_id).await? {
            info!("Deleted notice {}", notice_id);
            Ok(())
        } else {
            Err(Self::missing(notice_id))
        }
    }

    fn validate(command: NoticeCommand) -> DomainResult<NoticeFields> {
        Ok(NoticeFields {
            title: required_text(&command.title, "Title", MAX_TITLE_LEN)?,
            content: required_text(&command.content, "Content", MAX_CONTENT_LEN)?,
            priority: command.priority,
            expires_at: command.expires_at,
        })
    }

    fn missing(notice_id: i64) -> DomainError {
        warn!("Notice not found: {}", notice_id);
        DomainError::not_found(format!("Notice not found: {notice_id}"))
    }
}
