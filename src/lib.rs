mod config;
mod data_formats;
mod db_helpers;
pub mod errors;
mod handlers;
pub mod models;
pub mod validation;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use config::Config;
pub use data_formats::*;
use handlers::*;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};
use tower_http::trace::TraceLayer;

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(config: &Config) -> Result<()> {
    let db = init_db(&config.database_url).await?;
    let listener = TcpListener::bind(config.bind_address)
        .with_context(|| format!("Could not bind {}", config.bind_address))?;
    tracing::info!("Server started on {}", config.bind_address);
    serve(make_router(db), listener).await
}

pub async fn serve(app: Router, listener: TcpListener) -> Result<()> {
    axum::Server::from_tcp(listener)?
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    let pool = if db_url.contains(":memory:") {
        // Each connection to an in-memory database gets its own database.
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(db_url)
            .await?
    } else {
        if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            tracing::info!("Creating database {}", db_url);
            Sqlite::create_database(db_url)
                .await
                .with_context(|| format!("Could not create database {}", db_url))?;
        } else {
            tracing::info!("Database already exists");
        }
        SqlitePool::connect(db_url).await?
    };
    tracing::info!("Running Migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations completed");
    Ok(pool)
}

pub fn get_random_free_port() -> Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Could not get a free port")?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}

pub fn make_router(db: SqlitePool) -> Router {
    Router::new()
        .route("/check_health", get(alive))
        .route("/api", get(get_endpoints).fallback(method_not_allowed))
        .route(
            "/api/categories",
            get(get_categories)
                .post(post_category)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/reviews",
            get(get_reviews)
                .post(post_review)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/reviews/:review_id",
            get(get_review_by_id)
                .patch(patch_review)
                .delete(delete_review)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/reviews/:review_id/comments",
            get(get_comments_by_review_id)
                .post(post_comment)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/comments/:comment_id",
            patch(patch_comment)
                .delete(delete_comment)
                .fallback(method_not_allowed),
        )
        .route("/api/users", get(get_users).fallback(method_not_allowed))
        .route(
            "/api/users/:username",
            get(get_user).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(Extension(Arc::new(db)))
        .layer(TraceLayer::new_for_http())
}
