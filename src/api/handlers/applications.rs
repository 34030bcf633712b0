use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{Application, ApplicationStatus, CreateApplicationRequest},
    error::Result,
};

#[derive(Debug, Deserialize)]
pub struct ListApplicationsQuery {
    pub status: Option<ApplicationStatus>,
}

/// Admin review queue. Defaults to the pending pile.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListApplicationsQuery>,
) -> Result<Json<Vec<Application>>> {
    let status = params.status.unwrap_or(ApplicationStatus::Pending);
    let applications = state
        .service_context
        .application_repo
        .list_by_status(status)
        .await?;

    Ok(Json(applications))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<Application>)> {
    request.validate()?;

    let application = state
        .service_context
        .application_repo
        .create(request)
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn accept(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state
        .service_context
        .enrollment_service
        .accept(id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Application accepted"
    })))
}
