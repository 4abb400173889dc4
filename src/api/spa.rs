use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use std::path::Path;
use tracing::{debug, error};

use crate::AppState;
use crate::routing_utils::{ErrorDetail, Json};

/// The message returned for unmatched paths reserved for the API
const API_ROUTE_NOT_FOUND: &str = "API route not found";

/// Catch-all handler backing client-side routing. Any unmatched path receives the
/// front-end's entry document so the SPA router can take over, except paths under
/// the reserved "api" prefix which answer with a JSON 404 instead.
pub async fn spa_fallback(State(app_data): AppState, method: Method, uri: Uri) -> Response {
    serve_spa(&app_data.static_dir, &method, uri.path()).await
}

async fn serve_spa(static_dir: &Path, method: &Method, path: &str) -> Response {
    if path.trim_start_matches('/').starts_with("api") {
        debug!("Unmatched API path {path}");
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorDetail {
                detail: API_ROUTE_NOT_FOUND.to_owned(),
            }),
        )
            .into_response();
    }

    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    match tokio::fs::read_to_string(static_dir.join("index.html")).await {
        Ok(entry_document) => Html(entry_document).into_response(),
        Err(read_err) => {
            error!("Could not read the SPA entry document: {read_err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDetail {
                    detail: "Could not load the application".to_owned(),
                }),
            )
                .into_response()
        }
    }
}
