pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::services::bank::QuestionBank;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub bank: Arc<QuestionBank>,
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    // Load question sets
    let bank_dir =
        std::env::var("QUESTION_BANK_DIR").unwrap_or_else(|_| "question-banks".to_string());
    tracing::info!("Loading question bank from {}...", bank_dir);
    let bank = QuestionBank::load_dir(Path::new(&bank_dir))?;
    tracing::info!("Loaded {} question sets", bank.len());

    let state = AppState {
        db: Arc::new(db),
        bank: Arc::new(bank),
    };

    // Build router with protected routes
    let protected_routes = Router::new()
        // User routes
        .route("/api/users/me", get(routes::users::me))
        // Practice routes
        .route("/api/practice/questions", get(routes::practice::questions))
        .route("/api/practice/answer", post(routes::practice::submit_answer))
        .route("/api/practice/missed", get(routes::practice::missed))
        // Progress routes
        .route("/api/sections", get(routes::progress::sections))
        .route("/api/stats/{block}", get(routes::progress::block_stats))
        // Article routes
        .route("/api/articles", get(routes::articles::list))
        .route("/api/articles", post(routes::articles::create))
        .route("/api/articles/{id}/comments", get(routes::articles::comments))
        .route("/api/articles/{id}/comments", post(routes::articles::create_comment))
        .route("/api/articles/{id}/like", put(routes::articles::like))
        .route("/api/articles/{id}/like", delete(routes::articles::unlike))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    // Build full router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/users/register", post(routes::users::register))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
