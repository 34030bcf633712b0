pub mod enrollment;
pub mod notice_service;

use std::sync::Arc;

use crate::integrations::IntegrationManager;
use crate::repository::*;
use enrollment::EnrollmentService;
use notice_service::NoticeService;

pub struct ServiceContext {
    pub notice_repo: Arc<dyn NoticeRepository>,
    pub application_repo: Arc<dyn ApplicationRepository>,
    pub student_repo: Arc<dyn StudentRepository>,
    pub integration_manager: Arc<IntegrationManager>,
    pub notice_service: Arc<NoticeService>,
    pub enrollment_service: Arc<EnrollmentService>,
}

impl ServiceContext {
    pub fn new(
        notice_repo: Arc<dyn NoticeRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        student_repo: Arc<dyn StudentRepository>,
        integration_manager: Arc<IntegrationManager>,
        student_id_prefix: String,
        default_region: String,
    ) -> Self {
        let notice_service = Arc::new(NoticeService::new(
            notice_repo.clone(),
            integration_manager.clone(),
        ));
        let enrollment_service = Arc::new(EnrollmentService::new(
            application_repo.clone(),
            student_repo.clone(),
            integration_manager.clone(),
            student_id_prefix,
            default_region,
        ));

        Self {
            notice_repo,
            application_repo,
            student_repo,
            integration_manager,
            notice_service,
            enrollment_service,
        }
    }
}
