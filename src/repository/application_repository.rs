use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Application, ApplicationStatus, CreateApplicationRequest},
    error::{AppError, Result},
    repository::ApplicationRepository,
};

#[derive(FromRow)]
struct ApplicationRow {
    id: String,
    child_name: String,
    dob: NaiveDate,
    program: String,
    parent_name: String,
    phone: String,
    email: String,
    address: Option<String>,
    submitted_at: NaiveDateTime,
    status: String,
    login_email: Option<String>,
    login_password: Option<String>,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, child_name, dob, program, parent_name, phone, email, address,
           submitted_at, status, login_email, login_password
    FROM applications
"#;

pub struct SqliteApplicationRepository {
    pool: SqlitePool,
}

impl SqliteApplicationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_application(row: ApplicationRow) -> Result<Application> {
        Ok(Application {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            child_name: row.child_name,
            dob: row.dob,
            program: row.program,
            parent_name: row.parent_name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            submitted_at: DateTime::from_naive_utc_and_offset(row.submitted_at, Utc),
            status: Self::parse_status(&row.status)?,
            login_email: row.login_email,
            login_password: row.login_password,
        })
    }

    fn parse_status(s: &str) -> Result<ApplicationStatus> {
        match s {
            "Pending" => Ok(ApplicationStatus::Pending),
            "Accepted" => Ok(ApplicationStatus::Accepted),
            _ => Err(AppError::Database(format!(
                "Invalid application status: {}",
                s
            ))),
        }
    }

    fn status_to_str(status: ApplicationStatus) -> &'static str {
        match status {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Accepted => "Accepted",
        }
    }
}

#[async_trait]
impl ApplicationRepository for SqliteApplicationRepository {
    async fn create(&self, request: CreateApplicationRequest) -> Result<Application> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO applications (
                id, child_name, dob, program, parent_name, phone, email, address,
                submitted_at, status
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.child_name)
        .bind(request.dob)
        .bind(&request.program)
        .bind(&request.parent_name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.address)
        .bind(now)
        .bind(Self::status_to_str(ApplicationStatus::Pending))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created application".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_application(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            "{} WHERE status = ? ORDER BY submitted_at",
            SELECT_COLUMNS
        ))
        .bind(Self::status_to_str(status))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_application).collect()
    }

    async fn update(&self, id: Uuid, application: Application) -> Result<Application> {
        sqlx::query(
            r#"
            UPDATE applications
            SET child_name = ?, dob = ?, program = ?, parent_name = ?, phone = ?,
                email = ?, address = ?, status = ?, login_email = ?, login_password = ?
            WHERE id = ?
            "#,
        )
        .bind(&application.child_name)
        .bind(application.dob)
        .bind(&application.program)
        .bind(&application.parent_name)
        .bind(&application.phone)
        .bind(&application.email)
        .bind(&application.address)
        .bind(Self::status_to_str(application.status))
        .bind(&application.login_email)
        .bind(&application.login_password)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated application".to_string())
        })
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "{} WHERE login_email = ? AND login_password = ?",
            SELECT_COLUMNS
        ))
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_application(r)?)),
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
