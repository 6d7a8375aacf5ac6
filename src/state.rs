//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database handle, the values every rendered page needs, and the
//! `Last-Modified` stamp taken when the server started.

use std::sync::Arc;

use axum::http::HeaderValue;
use divine_client::app::SiteContext;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::db::Database;

/// Shared application state. Clone is required by Axum; inner fields are
/// `Arc`-wrapped or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub site: SiteContext,
    pub last_modified: HeaderValue,
}

impl AppState {
    #[must_use]
    pub fn new(db: Arc<dyn Database>, site: SiteContext) -> Self {
        Self { db, site, last_modified: http_date(OffsetDateTime::now_utc()) }
    }
}

/// Format an instant as an HTTP date, e.g. `Mon, 19 Oct 2026 10:00:00 GMT`.
#[must_use]
pub fn http_date(at: OffsetDateTime) -> HeaderValue {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    let utc = at.to_offset(time::UtcOffset::UTC);
    utc.format(format)
        .ok()
        .and_then(|s| HeaderValue::from_str(&s).ok())
        .unwrap_or_else(|| HeaderValue::from_static("Thu, 01 Jan 1970 00:00:00 GMT"))
}


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
