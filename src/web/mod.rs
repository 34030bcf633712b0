pub mod fragments;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{api::state::AppState, error::Result};

pub fn create_web_routes(state: AppState) -> Router {
    Router::new()
        .route("/fragments/notices/grid", get(notice_grid))
        .route("/fragments/notices/manage", get(notice_management_list))
        .route("/fragments/notices/ticker", get(notice_ticker))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct GridQuery {
    pub category: Option<String>,
}

async fn notice_grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> Result<Html<String>> {
    let notices = state.service_context.notice_service.list_notices().await?;
    let category = query.category.as_deref().unwrap_or("All");
    Ok(Html(fragments::render_public_grid(
        &notices,
        category,
        Utc::now(),
    )))
}

async fn notice_management_list(State(state): State<AppState>) -> Result<Html<String>> {
    let notices = state.service_context.notice_service.list_notices().await?;
    Ok(Html(fragments::render_management_list(&notices, Utc::now())))
}

async fn notice_ticker(State(state): State<AppState>) -> Result<Html<String>> {
    let notices = state.service_context.notice_service.list_notices().await?;
    Ok(Html(fragments::render_ticker(&notices)))
}
