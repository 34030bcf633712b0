use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    api::state::AppState,
    domain::{filter_visible, CreateNoticeRequest, Notice},
    error::Result,
    export::{build_document, PageGeometry},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Notice>>> {
    let notices = state.service_context.notice_service.list_notices().await?;
    Ok(Json(notices))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateNoticeRequest>,
) -> Result<(StatusCode, Json<Notice>)> {
    let notice = state
        .service_context
        .notice_service
        .create_notice(request)
        .await?;

    Ok((StatusCode::CREATED, Json(notice)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    // Deleting an id that is already gone still answers 204.
    state.service_context.notice_service.delete_notice(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub category: Option<String>,
}

pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response> {
    let notices = state.service_context.notice_service.list_notices().await?;
    let category = query.category.as_deref().unwrap_or("All");
    let now = Utc::now();

    let visible = filter_visible(&notices, category, now);
    let document = build_document(
        &state.settings.school.name,
        &state.settings.school.short_name,
        category,
        &visible,
        now,
        &PageGeometry::default(),
    );

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.to_text(),
    )
        .into_response())
}
