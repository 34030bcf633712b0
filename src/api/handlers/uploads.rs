use axum::{extract::Multipart, extract::State, Json};
use serde_json::json;

use crate::{
    api::state::AppState,
    error::{AppError, Result},
    uploads::save_uploaded_file,
};

/// Multipart upload, field name `file`. Responds with the stored public path
/// and the original filename, mirroring what the admin pages expect.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        if data.is_empty() {
            break;
        }

        let stored_path =
            save_uploaded_file(&state.settings.server.uploads_dir, &filename, &data).await?;

        return Ok(Json(json!({
            "success": true,
            "filePath": stored_path,
            "fileName": filename
        })));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}
