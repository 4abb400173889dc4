use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::http::HeaderValue;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

mod api;
mod app_env;
mod db;
mod domain;
mod dto;
mod external_connections;
mod logging;
mod persistence;
mod routing_utils;


/// Origins the bundled front-end is served from during local development
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8000,http://127.0.0.1:8000,http://localhost:5173,http://127.0.0.1:5173";

/// Application state shared across requests
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
    pub static_dir: PathBuf,
}

type AppState = State<Arc<SharedData>>;

/// Builds the permissive-but-allow-listed CORS policy from a comma-separated
/// set of origins
fn cors_layer(allowed_origins: &str) -> anyhow::Result<CorsLayer> {
    let origins = allowed_origins
        .split(',')
        .map(|origin| origin.trim().parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("parsing the CORS origin allow-list")?;

    // Credentialed requests forbid wildcards, so methods/headers mirror the request
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Assembles the application router: API routes under /todos, generated API docs,
/// bundled front-end assets, and the SPA fallback for everything else
fn todo_router(shared_data: Arc<SharedData>) -> Router {
    let assets_dir = shared_data.static_dir.join("assets");

    Router::new()
        .merge(api::swagger_main::build_documentation())
        .nest("/todos", api::todo::todo_routes())
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(api::spa::spa_fallback)
        .with_state(shared_data)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let env_filter = logging::init_env_filter();
    let otel_exporters = match (
        env::var(app_env::OTEL_SPAN_EXPORT_URL),
        env::var(app_env::OTEL_METRIC_EXPORT_URL),
    ) {
        (Ok(span_url), Ok(metric_url)) => Some(logging::init_exporters(&span_url, &metric_url)?),
        _ => None,
    };
    logging::setup_logging_and_tracing(env_filter, otel_exporters);

    let db_url = env::var(app_env::DB_URL)
        .with_context(|| format!("{} must be set", app_env::DB_URL))?;
    let pool = db::connect_sqlx(&db_url)
        .await
        .context("connecting to the database")?;
    db::ensure_schema(&pool)
        .await
        .context("bootstrapping the todo schema")?;

    let static_dir =
        PathBuf::from(env::var(app_env::STATIC_DIR).unwrap_or_else(|_| "static".to_owned()));
    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
        static_dir,
    });

    let allowed_origins = env::var(app_env::CORS_ALLOWED_ORIGINS)
        .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_owned());
    let router =
        logging::attach_tracing_http(todo_router(shared_data).layer(cors_layer(&allowed_origins)?));

    let listen_addr =
        env::var(app_env::LISTEN_ADDR).unwrap_or_else(|_| "0.0.0.0:8000".to_owned());
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    info!("Starting server on {listen_addr}.");
    axum::serve(listener, router).await.context("serving HTTP")?;

    Ok(())
}
