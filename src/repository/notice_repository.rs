use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{Notice, NoticeDraft},
    error::{AppError, Result},
    repository::NoticeRepository,
};

#[derive(FromRow)]
struct NoticeRow {
    id: i64,
    title: String,
    message: String,
    posted_by: String,
    class: String,
    category: String,
    date: NaiveDateTime,
    expiry: Option<NaiveDateTime>,
    image: Option<String>,
}

pub struct SqliteNoticeRepository {
    pool: SqlitePool,
}

impl SqliteNoticeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_notice(row: NoticeRow) -> Notice {
        Notice {
            id: row.id,
            title: row.title,
            message: row.message,
            posted_by: row.posted_by,
            class: row.class,
            category: row.category,
            date: DateTime::from_naive_utc_and_offset(row.date, Utc),
            expiry: row
                .expiry
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            image: row.image,
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Notice>> {
        let row = sqlx::query_as::<_, NoticeRow>(
            r#"
            SELECT id, title, message, posted_by, class, category, date, expiry, image
            FROM notices
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Self::row_to_notice))
    }
}

#[async_trait]
impl NoticeRepository for SqliteNoticeRepository {
    async fn create(&self, draft: NoticeDraft) -> Result<Notice> {
        let now = Utc::now().naive_utc();
        let expiry_naive = draft.expiry.map(|dt| dt.naive_utc());

        // The id is recomputed from the live table inside the insert, so a
        // deleted max id is handed out again on the next create.
        let result = sqlx::query(
            r#"
            INSERT INTO notices (id, title, message, posted_by, class, category, date, expiry, image)
            VALUES ((SELECT COALESCE(MAX(id), 0) + 1 FROM notices), ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.message)
        .bind(&draft.posted_by)
        .bind(&draft.class)
        .bind(&draft.category)
        .bind(now)
        .bind(expiry_naive)
        .bind(&draft.image)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(result.last_insert_rowid()).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created notice".to_string())
        })
    }

    async fn list(&self) -> Result<Vec<Notice>> {
        let rows = sqlx::query_as::<_, NoticeRow>(
            r#"
            SELECT id, title, message, posted_by, class, category, date, expiry, image
            FROM notices
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_notice).collect())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM notices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
