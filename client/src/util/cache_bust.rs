//! Cache-bust token and URL rewriting.
//!
//! Asset URLs lose their query string and gain `v=<token>`; request URLs keep
//! their query and gain `_=<token>`. Fragments are carried over untouched.

#[cfg(test)]
#[path = "cache_bust_test.rs"]
mod cache_bust_test;

/// Query parameter appended to stylesheet and script URLs.
pub const ASSET_PARAM: &str = "v";
/// Query parameter appended to outgoing request URLs.
pub const REQUEST_PARAM: &str = "_";

/// Millisecond timestamp taken once per page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheBustToken(pub u64);

impl CacheBustToken {
    /// Token for the current instant.
    #[must_use]
    pub fn now() -> Self {
        #[cfg(feature = "hydrate")]
        {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Self(js_sys::Date::now() as u64)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let millis = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
            Self(millis)
        }
    }
}

impl std::fmt::Display for CacheBustToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn split_fragment(url: &str) -> (&str, &str) {
    match url.find('#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    }
}

/// Replace any query string on `url` with a single `v=<token>`.
#[must_use]
pub fn bust_asset_url(url: &str, token: CacheBustToken) -> String {
    let (base, fragment) = split_fragment(url);
    let path = base.split('?').next().unwrap_or(base);
    format!("{path}?{ASSET_PARAM}={token}{fragment}")
}

/// Append `name=value` to `url`, keeping whatever query it already has.
#[must_use]
pub fn append_query_param(url: &str, name: &str, value: &str) -> String {
    let (base, fragment) = split_fragment(url);
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{name}={value}{fragment}")
}

/// Whether `url` points at the script that boots the page runtime. That
/// script is never rewritten.
#[must_use]
pub fn is_main_entry(url: &str, marker: &str) -> bool {
    !marker.is_empty() && url.contains(marker)
}
