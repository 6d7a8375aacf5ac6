//! `GET` handlers for the storefront pages.

use axum::extract::{Query, State};
use axum::response::Html;
use divine_client::pages::{auth, home};
use divine_client::state::forms::FormPanel;
use serde::Deserialize;

use super::PageError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Panel slug to open first: `login`, `register` or `forgot`.
    pub panel: Option<String>,
}

/// `GET /`
///
/// # Errors
///
/// Returns [`PageError`] if the database does not answer.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    state.db.ping().await?;
    Ok(Html(home::render(&state.site)))
}

/// `GET /login`: the auth page. `?panel=register` opens the register panel.
///
/// # Errors
///
/// Returns [`PageError`] if the database does not answer.
pub async fn login(State(state): State<AppState>, Query(query): Query<LoginQuery>) -> Result<Html<String>, PageError> {
    state.db.ping().await?;
    let panel = query.panel.as_deref().and_then(FormPanel::from_slug).unwrap_or_default();
    Ok(Html(auth::render(&state.site, &auth::AuthView::panel(panel))))
}
