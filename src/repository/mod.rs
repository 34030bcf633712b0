use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod application_repository;
pub mod notice_repository;
pub mod student_repository;

pub use application_repository::SqliteApplicationRepository;
pub use notice_repository::SqliteNoticeRepository;
pub use student_repository::SqliteStudentRepository;

#[async_trait]
pub trait NoticeRepository: Send + Sync {
    /// Persists the draft, assigning `id = max(ids) + 1` over the live
    /// collection (1 when empty) and stamping `date` with the current time.
    async fn create(&self, draft: NoticeDraft) -> Result<Notice>;
    /// All notices in feed (insertion) order.
    async fn list(&self) -> Result<Vec<Notice>>;
    /// Removing an absent id is a no-op, not an error.
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn create(&self, request: CreateApplicationRequest) -> Result<Application>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>>;
    async fn list_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>>;
    async fn update(&self, id: Uuid, application: Application) -> Result<Application>;
    async fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<Application>>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create(&self, student: Student) -> Result<Student>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Student>>;
    async fn find_by_parent_email(&self, email: &str) -> Result<Option<Student>>;
    async fn list(&self) -> Result<Vec<Student>>;
    async fn count(&self) -> Result<i64>;
}
