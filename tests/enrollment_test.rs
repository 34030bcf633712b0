use std::sync::Arc;

use chrono::{Months, NaiveDate, Utc};
use schoolhouse::{
    domain::{ApplicationStatus, CreateApplicationRequest, Level},
    error::AppError,
    integrations::IntegrationManager,
    repository::{
        ApplicationRepository, SqliteApplicationRepository, SqliteStudentRepository,
        StudentRepository,
    },
    service::enrollment::EnrollmentService,
};
use sqlx::SqlitePool;
use uuid::Uuid;

struct Fixture {
    applications: Arc<SqliteApplicationRepository>,
    students: Arc<SqliteStudentRepository>,
    service: EnrollmentService,
}

async fn fixture() -> anyhow::Result<Fixture> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let applications = Arc::new(SqliteApplicationRepository::new(pool.clone()));
    let students = Arc::new(SqliteStudentRepository::new(pool.clone()));
    let service = EnrollmentService::new(
        applications.clone(),
        students.clone(),
        Arc::new(IntegrationManager::new()),
        "EZ".to_string(),
        "Greater Accra".to_string(),
    );

    Ok(Fixture {
        applications,
        students,
        service,
    })
}

fn application_request(dob: NaiveDate, program: &str) -> CreateApplicationRequest {
    CreateApplicationRequest {
        child_name: "Ama Mensah".to_string(),
        dob,
        program: program.to_string(),
        parent_name: "Kofi Mensah".to_string(),
        phone: "+233 24 000 0000".to_string(),
        email: "kofi.mensah@example.com".to_string(),
        address: None,
    }
}

#[tokio::test]
async fn accept_unknown_id_is_not_found_and_writes_nothing() -> anyhow::Result<()> {
    let fx = fixture().await?;

    let result = fx.service.accept(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert_eq!(fx.applications.count().await?, 0);
    assert_eq!(fx.students.count().await?, 0);

    Ok(())
}

#[tokio::test]
async fn accept_transitions_the_application_and_creates_one_student() -> anyhow::Result<()> {
    let fx = fixture().await?;

    // Born exactly six years ago, so the derived age is six regardless of
    // the day this test runs.
    let today = Utc::now().date_naive();
    let dob = today.checked_sub_months(Months::new(72)).unwrap();
    let created = fx
        .applications
        .create(application_request(dob, "JHS 2"))
        .await?;
    assert_eq!(created.status, ApplicationStatus::Pending);

    let outcome = fx.service.accept(created.id).await?;

    let application = outcome.application;
    assert_eq!(application.status, ApplicationStatus::Accepted);
    assert_eq!(application.login_email.as_deref(), Some("kofi.mensah@example.com"));
    let password = application.login_password.expect("credential minted");
    assert_eq!(password.len(), 8);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));

    let students = fx.students.list().await?;
    assert_eq!(students.len(), 1);
    let student = &students[0];
    assert_eq!(student.name, "Ama Mensah");
    assert_eq!(student.age, 6);
    assert_eq!(student.class, "JHS 2");
    assert_eq!(student.level, Level::Jhs);
    assert_eq!(student.region, "Greater Accra");
    assert_eq!(student.attendance, "100%");
    assert!(student.report_card.is_empty());
    assert!(student.id.starts_with("EZ"));
    assert_eq!(student.id.len(), 8);
    assert_eq!(student.parent.email, "kofi.mensah@example.com");

    // The pending queue is empty and the accepted queue holds the record.
    let pending = fx
        .applications
        .list_by_status(ApplicationStatus::Pending)
        .await?;
    assert!(pending.is_empty());
    let accepted = fx
        .applications
        .list_by_status(ApplicationStatus::Accepted)
        .await?;
    assert_eq!(accepted.len(), 1);

    Ok(())
}

#[tokio::test]
async fn minted_credentials_allow_lookup() -> anyhow::Result<()> {
    let fx = fixture().await?;

    let dob = NaiveDate::from_ymd_opt(2018, 3, 5).unwrap();
    let created = fx
        .applications
        .create(application_request(dob, "Primary 1"))
        .await?;
    let outcome = fx.service.accept(created.id).await?;

    let found = fx
        .applications
        .find_by_credentials(
            outcome.application.login_email.as_deref().unwrap(),
            outcome.application.login_password.as_deref().unwrap(),
        )
        .await?;
    assert!(found.is_some());

    let wrong = fx
        .applications
        .find_by_credentials("kofi.mensah@example.com", "nope1234")
        .await?;
    assert!(wrong.is_none());

    let student = fx
        .students
        .find_by_parent_email("kofi.mensah@example.com")
        .await?;
    assert!(student.is_some());

    Ok(())
}
