//! No-cache policy applied to outgoing requests.
//!
//! DESIGN
//! ======
//! `NoCachePolicy` is the pure part: URL rewriting and header merging. How
//! the policy reaches the page's request functions is a `RequestHooks`
//! strategy chosen at startup (the fetch wrapper, a jQuery-style AJAX
//! setup, or a recorder in tests) instead of probing for globals at runtime.

#[cfg(test)]
#[path = "no_cache_test.rs"]
mod no_cache_test;

use http::header::{CACHE_CONTROL, EXPIRES, HeaderMap, HeaderValue, PRAGMA};

use crate::util::cache_bust::{CacheBustToken, REQUEST_PARAM, append_query_param};

/// Header values that disable caching, in the order they are emitted.
pub const NO_CACHE_HEADERS: [(&str, &str); 3] = [
    ("Cache-Control", "no-cache, no-store, must-revalidate"),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
];

/// An outgoing request as seen by the hooks.
#[derive(Clone, Debug, Default)]
pub struct FetchRequest {
    pub url: String,
    pub headers: HeaderMap,
}

impl FetchRequest {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), headers: HeaderMap::new() }
    }

    #[must_use]
    pub fn with_header(mut self, name: http::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoCachePolicy {
    token: CacheBustToken,
}

impl NoCachePolicy {
    #[must_use]
    pub fn new(token: CacheBustToken) -> Self {
        Self { token }
    }

    #[must_use]
    pub fn token(&self) -> CacheBustToken {
        self.token
    }

    /// Append `_=<token>` to a request URL without disturbing its query.
    #[must_use]
    pub fn rewrite_request_url(&self, url: &str) -> String {
        append_query_param(url, REQUEST_PARAM, &self.token.to_string())
    }

    #[must_use]
    pub fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE_HEADERS[0].1));
        headers.insert(PRAGMA, HeaderValue::from_static(NO_CACHE_HEADERS[1].1));
        headers.insert(EXPIRES, HeaderValue::from_static(NO_CACHE_HEADERS[2].1));
        headers
    }

    /// No-cache defaults overlaid with the caller's headers. A caller header
    /// replaces a default of the same name (names compare case-insensitively);
    /// every other caller header is kept, including repeated values.
    #[must_use]
    pub fn merge_headers(&self, caller: &HeaderMap) -> HeaderMap {
        let mut merged = Self::default_headers();
        for name in caller.keys() {
            merged.remove(name);
        }
        for (name, value) in caller {
            merged.append(name.clone(), value.clone());
        }
        merged
    }

    #[must_use]
    pub fn prepare(&self, request: FetchRequest) -> FetchRequest {
        FetchRequest { url: self.rewrite_request_url(&request.url), headers: self.merge_headers(&request.headers) }
    }
}

/// A way of routing the page's outgoing requests through a `NoCachePolicy`.
pub trait RequestHooks {
    fn name(&self) -> &'static str;

    fn install(&mut self, policy: NoCachePolicy);

    /// Restore the original request behavior.
    fn uninstall(&mut self) {}
}
