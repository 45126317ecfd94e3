pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::db::Database;
use crate::services::ai::{ConfiguredResolver, ProviderResolver};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub ai: Arc<dyn ProviderResolver>,
    pub config: Arc<AppConfig>,
}

/// Build the full router for the given state
pub fn build_router(state: AppState) -> Router {
    let student_routes = Router::new()
        // Daily plan and aggregation
        .route("/api/training/today", get(routes::training::today_plan))
        .route("/api/training/stats", get(routes::training::stats))
        .route("/api/training/calendar", get(routes::training::calendar))
        .route("/api/training/history", get(routes::training::history))
        .route(
            "/api/training/submissions/:id",
            get(routes::training::submission_detail),
        )
        // Writing modules
        .route(
            "/api/training/chinese-writing/topic",
            post(routes::writing::chinese_topic),
        )
        .route(
            "/api/training/chinese-writing/submit",
            post(routes::writing::chinese_submit),
        )
        .route(
            "/api/training/english-writing/topic",
            post(routes::writing::english_topic),
        )
        .route(
            "/api/training/english-writing/submit",
            post(routes::writing::english_submit),
        )
        // Reading modules
        .route(
            "/api/training/classical-reading/passage",
            post(routes::reading::classical_passage),
        )
        .route(
            "/api/training/classical-reading/submit",
            post(routes::reading::classical_submit),
        )
        .route(
            "/api/training/english-reading/passage",
            post(routes::reading::english_passage),
        )
        .route(
            "/api/training/english-reading/submit",
            post(routes::reading::english_submit),
        )
        // Mistake notebook
        .route("/api/mistakes", get(routes::mistakes::list))
        .route("/api/mistakes/:id", patch(routes::mistakes::update))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::student_auth,
        ));

    let parent_routes = Router::new()
        .route("/api/parent/child", get(routes::parent::child))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::parent_auth,
        ));

    let admin_routes = Router::new()
        .route(
            "/api/admin/ai-config",
            get(routes::admin::list_ai_configs).put(routes::admin::update_ai_config),
        )
        .route("/api/admin/stats", get(routes::admin::stats))
        .route("/api/admin/users", get(routes::admin::users))
        .route(
            "/api/admin/texts",
            get(routes::admin::list_texts).post(routes::admin::create_text),
        )
        .route(
            "/api/admin/texts/:id",
            put(routes::admin::update_text).delete(routes::admin::delete_text),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::admin_auth,
        ));

    Router::new()
        .route("/health", get(routes::health::liveness))
        .route("/api/health", get(routes::health::status))
        .merge(student_routes)
        .merge(parent_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(environment = config.environment.as_str(), "loaded configuration");

    tracing::info!("Connecting to database...");
    let db = Arc::new(Database::connect(&config.database_url, config.max_connections).await?);

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    if config.environment.is_development() {
        services::seed::seed_dev_fixtures(&db, &config.ai).await?;
    }

    let resolver = ConfiguredResolver::new(db.clone(), config.ai.clone())?;

    let addr = config.bind_addr();
    let state = AppState {
        db,
        ai: Arc::new(resolver),
        config: Arc::new(config),
    };

    let app = build_router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
