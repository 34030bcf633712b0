use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schoolhouse::{
    api,
    config::Settings,
    integrations::{mailer::AcceptanceMailer, IntegrationManager},
    repository::{SqliteApplicationRepository, SqliteNoticeRepository, SqliteStudentRepository},
    service::ServiceContext,
    web,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schoolhouse=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting Schoolhouse server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize repositories
    let notice_repo = Arc::new(SqliteNoticeRepository::new(db_pool.clone()));
    let application_repo = Arc::new(SqliteApplicationRepository::new(db_pool.clone()));
    let student_repo = Arc::new(SqliteStudentRepository::new(db_pool.clone()));

    // Initialize integration manager
    let integration_manager = Arc::new(IntegrationManager::new());

    if let Some(mailer) =
        AcceptanceMailer::new(settings.mailer.clone(), settings.school.name.clone())
    {
        integration_manager.register(Arc::new(mailer)).await;
    }

    // Check integration health
    let health_results = integration_manager.health_check_all().await;
    for (name, result) in health_results {
        match result {
            Ok(_) => tracing::info!("Integration {} is healthy", name),
            Err(e) => tracing::warn!("Integration {} health check failed: {:?}", name, e),
        }
    }

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        notice_repo,
        application_repo,
        student_repo,
        integration_manager,
        settings.school.student_id_prefix.clone(),
        settings.school.default_region.clone(),
    ));

    let settings = Arc::new(settings);

    // API app plus the HTML fragment routes and static uploads
    let api_app = api::create_app(service_context.clone(), settings.clone());
    let web_app = web::create_web_routes(api::state::AppState::new(
        service_context,
        settings.clone(),
    ));

    let app = api_app
        .merge(web_app)
        .nest_service("/uploads", ServeDir::new(&settings.server.uploads_dir));

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!(
        "Server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
