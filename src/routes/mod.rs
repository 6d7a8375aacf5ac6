//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the page routes, the form submission targets and the health probe
//! under one Axum router, plus the static `/data` assets and the compiled
//! client bundle under `/pkg`. Every HTML response carries no-cache headers
//! and a `Last-Modified` stamp fixed at server start, which the browser's
//! update watcher compares against.

pub mod auth;
pub mod health;
pub mod pages;

use std::path::Path;

use axum::Router;
use axum::http::header::{CACHE_CONTROL, EXPIRES, LAST_MODIFIED, PRAGMA};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use divine_client::net::no_cache::NO_CACHE_HEADERS;
use divine_client::pages::error;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::db::DbError;
use crate::state::AppState;

/// Failure that aborts page rendering.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Lỗi kết nối: {0}")]
    Database(#[from] DbError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!(error = %message, "page render aborted");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(error::render(&message))).into_response()
    }
}

/// HTML routes, wrapped with the no-cache and `Last-Modified` headers.
fn page_routes(state: AppState) -> Router {
    let last_modified = state.last_modified.clone();
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/forgot", post(auth::forgot))
        .layer(SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE_HEADERS[0].1)))
        .layer(SetResponseHeaderLayer::overriding(PRAGMA, HeaderValue::from_static(NO_CACHE_HEADERS[1].1)))
        .layer(SetResponseHeaderLayer::overriding(EXPIRES, HeaderValue::from_static(NO_CACHE_HEADERS[2].1)))
        .layer(SetResponseHeaderLayer::overriding(LAST_MODIFIED, last_modified))
        .with_state(state)
}

/// Full application router.
pub fn app(state: AppState, static_dir: &Path, pkg_dir: &Path) -> Router {
    let probes = Router::new().route("/healthz", get(health::healthz)).with_state(state.clone());
    page_routes(state)
        .merge(probes)
        .nest_service("/data", ServeDir::new(static_dir))
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
