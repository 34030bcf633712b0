use axum::{extract::State, Json};

use crate::{api::state::AppState, domain::Student, error::Result};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>> {
    let students = state.service_context.student_repo.list().await?;
    Ok(Json(students))
}
