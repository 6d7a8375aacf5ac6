//! Form submission targets for the auth page.
//!
//! DESIGN
//! ======
//! Submissions are re-validated with the same predicates the browser uses.
//! A rejected form re-renders the page with its panel open and the first
//! failing field's message (422). Accounts are not stored anywhere yet, so
//! a valid submission answers 501 with a notice instead of pretending to
//! succeed.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use divine_client::net::types::{ForgotForm, LoginForm, RegisterForm};
use divine_client::pages::auth::{AuthView, render};
use divine_client::state::forms::FormPanel;
use divine_client::util::validate::{FieldError, check_forgot, check_login, check_register};

use super::PageError;
use crate::state::AppState;

pub const UNSUPPORTED_NOTICE: &str = "Chức năng này chưa được hỗ trợ.";

type Reply = (StatusCode, Html<String>);

fn reply(state: &AppState, panel: FormPanel, outcome: Result<(), FieldError>) -> Reply {
    match outcome {
        Err(err) => {
            tracing::info!(panel = panel.slug(), field = err.field.name(), "submission rejected");
            (StatusCode::UNPROCESSABLE_ENTITY, Html(render(&state.site, &AuthView::rejected(panel, err.message))))
        }
        Ok(()) => {
            tracing::info!(panel = panel.slug(), "submission valid but not supported");
            (StatusCode::NOT_IMPLEMENTED, Html(render(&state.site, &AuthView::info(panel, UNSUPPORTED_NOTICE))))
        }
    }
}

/// `POST /auth/login`
///
/// # Errors
///
/// Returns [`PageError`] if the database does not answer.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Reply, PageError> {
    state.db.ping().await?;
    tracing::debug!(?form, "login submission");
    Ok(reply(&state, FormPanel::Login, check_login(&form)))
}

/// `POST /auth/register`
///
/// # Errors
///
/// Returns [`PageError`] if the database does not answer.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Result<Reply, PageError> {
    state.db.ping().await?;
    tracing::debug!(?form, "register submission");
    Ok(reply(&state, FormPanel::Register, check_register(&form)))
}

/// `POST /auth/forgot`
///
/// # Errors
///
/// Returns [`PageError`] if the database does not answer.
pub async fn forgot(State(state): State<AppState>, Form(form): Form<ForgotForm>) -> Result<Reply, PageError> {
    state.db.ping().await?;
    Ok(reply(&state, FormPanel::ForgotPassword, check_forgot(&form)))
}
