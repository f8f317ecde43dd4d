use std::sync::Arc;
use axum::{routing::post, Router, Json};
use tower_http::cors::{CorsLayer, Any};
use serde::{Deserialize, Serialize};
use axum::http::StatusCode;
use tracing::{info, warn};
use crate::database::Database;
use crate::engine::{Engine, SearchOptions, SearchResult};
use crate::filter::FilterSpec;
use crate::format::Complexity;

#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub complexity: Option<Complexity>,
    #[serde(default)]
    pub show_statement: bool,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    pub statement: String,
    #[serde(default)]
    pub complexity: Option<Complexity>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub status: String,
    pub elapsed_ms: f64,
    #[serde(flatten)]
    pub result: SearchResult,
}

enum Request {
    Search(SearchRequest),
    Import(ImportRequest),
}

pub fn router(database: Arc<Database>, complexity: Complexity) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::POST])
        .allow_headers(Any);
    let search_db = Arc::clone(&database);
    Router::new()
        .route("/v1/search", post(move |Json(req): Json<SearchRequest>| {
            respond(Arc::clone(&search_db), Request::Search(req), complexity)
        }))
        .route("/v1/import", post(move |Json(req): Json<ImportRequest>| {
            respond(Arc::clone(&database), Request::Import(req), complexity)
        }))
        .layer(cors)
}

async fn respond(
    database: Arc<Database>,
    request: Request,
    default_complexity: Complexity,
) -> Result<(StatusCode, Json<SearchResponse>), (StatusCode, &'static str)> {
    // The engine is synchronous, so each search runs on a blocking thread.
    let started = std::time::Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        let engine = Engine::new(&database);
        match request {
            Request::Search(req) => {
                let options = SearchOptions { csv_path: None, show_statement: req.show_statement };
                engine.search(&req.filter, req.complexity.unwrap_or(default_complexity), &options)
            }
            Request::Import(req) => {
                let options = SearchOptions { csv_path: None, show_statement: true };
                engine.import(&req.statement, req.complexity.unwrap_or(default_complexity), &options)
            }
        }
    }).await.map_err(|e| {
        warn!(error=%e, "Join error");
        (StatusCode::INTERNAL_SERVER_ERROR, "Join error")
    })?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let status = match result.error.as_deref() {
        None => {
            info!(ms=elapsed_ms, rows=result.count(), "search complete");
            StatusCode::OK
        }
        Some(msg) => {
            // a failing statement is the caller's input, not a server fault
            warn!(%msg, "search error");
            StatusCode::BAD_REQUEST
        }
    };
    let label = if status == StatusCode::OK { "ok" } else { "error" };
    Ok((status, Json(SearchResponse { status: label.into(), elapsed_ms, result })))
}

/// Binds `address` and serves the search endpoints until the process ends.
pub async fn serve(database: Arc<Database>, address: &str, complexity: Complexity) -> crate::error::Result<()> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|e| crate::error::AutomatchError::Server(format!("cannot bind {address}: {e}")))?;
    info!(address, "serving /v1/search and /v1/import");
    axum::serve(listener, router(database, complexity))
        .await
        .map_err(|e| crate::error::AutomatchError::Server(e.to_string()))
}
