use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Schoolhouse API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Content and admissions backend for the school website",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "notices": "/api/notices",
            "applications": "/api/applications",
            "students": "/api/students",
            "upload": "/api/upload"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
