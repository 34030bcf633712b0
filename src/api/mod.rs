pub mod handlers;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext, uploads};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // Auth
        .route("/auth/login", post(handlers::auth::login))
        // API routes
        .nest("/api", api_routes())
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // The static site is served from elsewhere
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/notices", notice_routes())
        .nest("/applications", application_routes())
        .route("/students", get(handlers::students::list))
        .route(
            "/upload",
            post(handlers::uploads::upload)
                // A little headroom over the stored-file bound so the
                // multipart framing itself doesn't trip the limit.
                .layer(DefaultBodyLimit::max(uploads::MAX_FILE_SIZE + 64 * 1024)),
        )
}

fn notice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::notices::list))
        .route("/", post(handlers::notices::create))
        .route("/export", get(handlers::notices::export))
        .route("/:id", delete(handlers::notices::delete))
}

fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::applications::list))
        .route("/", post(handlers::applications::create))
        .route("/:id/accept", post(handlers::applications::accept))
}
