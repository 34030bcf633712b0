use std::sync::Arc;

use crate::{
    domain::{CreateNoticeRequest, Notice, NoticeDraft},
    error::Result,
    integrations::{IntegrationEvent, IntegrationManager},
    repository::NoticeRepository,
};

pub struct NoticeService {
    repo: Arc<dyn NoticeRepository>,
    integration_manager: Arc<IntegrationManager>,
}

impl NoticeService {
    pub fn new(repo: Arc<dyn NoticeRepository>, integration_manager: Arc<IntegrationManager>) -> Self {
        Self {
            repo,
            integration_manager,
        }
    }

    pub async fn create_notice(&self, request: CreateNoticeRequest) -> Result<Notice> {
        let draft = NoticeDraft::from_request(request);
        let notice = self.repo.create(draft).await?;

        if notice.category == "Urgent" {
            self.integration_manager
                .handle_event(IntegrationEvent::UrgentNoticePosted(notice.clone()))
                .await;
        }

        Ok(notice)
    }

    pub async fn list_notices(&self) -> Result<Vec<Notice>> {
        self.repo.list().await
    }

    pub async fn delete_notice(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await
    }
}
