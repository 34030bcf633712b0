use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{Level, ParentContact, ReportCardEntry, Student},
    error::{AppError, Result},
    repository::StudentRepository,
};

#[derive(FromRow)]
struct StudentRow {
    id: String,
    name: String,
    age: i32,
    class: String,
    level: String,
    region: String,
    parent_name: String,
    parent_phone: String,
    parent_email: String,
    enrollment_date: NaiveDateTime,
    attendance: String,
    photo: Option<String>,
    report_card: String,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, age, class, level, region, parent_name, parent_phone,
           parent_email, enrollment_date, attendance, photo, report_card
    FROM students
"#;

pub struct SqliteStudentRepository {
    pool: SqlitePool,
}

impl SqliteStudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_student(row: StudentRow) -> Result<Student> {
        let report_card: Vec<ReportCardEntry> = serde_json::from_str(&row.report_card)
            .map_err(|e| AppError::Database(format!("Invalid report card payload: {}", e)))?;

        Ok(Student {
            id: row.id,
            name: row.name,
            age: row.age,
            class: row.class,
            level: Self::parse_level(&row.level)?,
            region: row.region,
            parent: ParentContact {
                name: row.parent_name,
                phone: row.parent_phone,
                email: row.parent_email,
            },
            enrollment_date: DateTime::from_naive_utc_and_offset(row.enrollment_date, Utc),
            attendance: row.attendance,
            photo: row.photo,
            report_card,
        })
    }

    fn parse_level(s: &str) -> Result<Level> {
        match s {
            "Pre-School" => Ok(Level::PreSchool),
            "Primary" => Ok(Level::Primary),
            "JHS" => Ok(Level::Jhs),
            _ => Err(AppError::Database(format!("Invalid level: {}", s))),
        }
    }
}

#[async_trait]
impl StudentRepository for SqliteStudentRepository {
    async fn create(&self, student: Student) -> Result<Student> {
        let report_card = serde_json::to_string(&student.report_card)
            .map_err(|e| AppError::Database(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO students (
                id, name, age, class, level, region, parent_name, parent_phone,
                parent_email, enrollment_date, attendance, photo, report_card
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&student.id)
        .bind(&student.name)
        .bind(student.age)
        .bind(&student.class)
        .bind(student.level.as_str())
        .bind(&student.region)
        .bind(&student.parent.name)
        .bind(&student.parent.phone)
        .bind(&student.parent.email)
        .bind(student.enrollment_date.naive_utc())
        .bind(&student.attendance)
        .bind(&student.photo)
        .bind(&report_card)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(&student.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created student".to_string())
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_student(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_parent_email(&self, email: &str) -> Result<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "{} WHERE parent_email = ? ORDER BY enrollment_date DESC",
            SELECT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_student(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Student>> {
        let rows = sqlx::query_as::<_, StudentRow>(&format!(
            "{} ORDER BY enrollment_date",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_student).collect()
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
