//! Browser request hooks that route page requests through a `NoCachePolicy`.
//!
//! `FetchHook` wraps `window.fetch`; `JqueryAjaxHook` configures jQuery's
//! AJAX defaults when jQuery is present on the page.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::no_cache::{NO_CACHE_HEADERS, NoCachePolicy, RequestHooks};

fn window_prop(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str(name)).ok().filter(|v| !v.is_undefined() && !v.is_null())
}

/// Read `[name, value]` pairs from a `Headers` instance, an array of pairs or
/// a plain object.
fn caller_headers(raw: &JsValue) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if raw.is_undefined() || raw.is_null() {
        return headers;
    }
    let pairs: Vec<JsValue> = if raw.is_instance_of::<web_sys::Headers>() || Array::is_array(raw) {
        match js_sys::try_iter(raw) {
            Ok(Some(iter)) => iter.filter_map(Result::ok).collect(),
            _ => Vec::new(),
        }
    } else {
        Object::entries(raw.unchecked_ref()).iter().collect()
    };

    for pair in pairs {
        let pair = Array::from(&pair);
        let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) else {
            continue;
        };
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            headers.append(name, value);
        }
    }
    headers
}

fn headers_object(headers: &HeaderMap) -> Object {
    let out = Object::new();
    for name in headers.keys() {
        let joined =
            headers.get_all(name).iter().filter_map(|v| v.to_str().ok()).collect::<Vec<_>>().join(", ");
        let _ = Reflect::set(&out, &JsValue::from_str(name.as_str()), &JsValue::from_str(&joined));
    }
    out
}

/// Copy of the caller's `init` with the merged no-cache headers.
fn prepare_init(policy: &NoCachePolicy, init: &JsValue) -> JsValue {
    let copy = Object::new();
    if init.is_object() {
        Object::assign(&copy, init.unchecked_ref());
    }
    let existing = Reflect::get(&copy, &JsValue::from_str("headers")).unwrap_or(JsValue::UNDEFINED);
    let merged = policy.merge_headers(&caller_headers(&existing));
    let _ = Reflect::set(&copy, &JsValue::from_str("headers"), &headers_object(&merged));
    copy.into()
}

// =============================================================================
// FETCH
// =============================================================================

#[derive(Default)]
pub struct FetchHook {
    original: Option<Function>,
    wrapper: Option<Closure<dyn FnMut(JsValue, JsValue) -> JsValue>>,
}

impl RequestHooks for FetchHook {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn install(&mut self, policy: NoCachePolicy) {
        let Some(original) = window_prop("fetch").and_then(|f| f.dyn_into::<Function>().ok()) else {
            log::debug!("fetch not available, hook skipped");
            return;
        };
        let inner = original.clone();
        let wrapper = Closure::wrap(Box::new(move |input: JsValue, init: JsValue| -> JsValue {
            let input = match input.as_string() {
                Some(url) => JsValue::from_str(&policy.rewrite_request_url(&url)),
                None => input,
            };
            let init = prepare_init(&policy, &init);
            inner.call2(&JsValue::UNDEFINED, &input, &init).unwrap_or_else(|e| js_sys::Promise::reject(&e).into())
        }) as Box<dyn FnMut(JsValue, JsValue) -> JsValue>);

        if let Some(window) = web_sys::window() {
            if Reflect::set(&window, &JsValue::from_str("fetch"), wrapper.as_ref()).is_ok() {
                self.original = Some(original);
                self.wrapper = Some(wrapper);
            }
        }
    }

    fn uninstall(&mut self) {
        if let (Some(window), Some(original)) = (web_sys::window(), self.original.take()) {
            let _ = Reflect::set(&window, &JsValue::from_str("fetch"), &original);
        }
        self.wrapper = None;
    }
}

// =============================================================================
// JQUERY
// =============================================================================

#[derive(Default)]
pub struct JqueryAjaxHook {
    installed: bool,
}

impl JqueryAjaxHook {
    fn ajax_setup(settings: &Object) -> bool {
        let Some(jquery) = window_prop("jQuery") else {
            return false;
        };
        let Some(setup) =
            Reflect::get(&jquery, &JsValue::from_str("ajaxSetup")).ok().and_then(|f| f.dyn_into::<Function>().ok())
        else {
            return false;
        };
        setup.call1(&jquery, settings).is_ok()
    }
}

impl RequestHooks for JqueryAjaxHook {
    fn name(&self) -> &'static str {
        "jquery-ajax"
    }

    /// jQuery appends its own `_=<timestamp>` when `cache` is false.
    fn install(&mut self, _policy: NoCachePolicy) {
        let headers = Object::new();
        for (name, value) in NO_CACHE_HEADERS {
            let _ = Reflect::set(&headers, &JsValue::from_str(name), &JsValue::from_str(value));
        }
        let settings = Object::new();
        let _ = Reflect::set(&settings, &JsValue::from_str("cache"), &JsValue::FALSE);
        let _ = Reflect::set(&settings, &JsValue::from_str("headers"), &headers);
        self.installed = Self::ajax_setup(&settings);
        if !self.installed {
            log::debug!("jQuery not present, AJAX hook skipped");
        }
    }

    fn uninstall(&mut self) {
        if !self.installed {
            return;
        }
        let settings = Object::new();
        let _ = Reflect::set(&settings, &JsValue::from_str("cache"), &JsValue::TRUE);
        let _ = Reflect::set(&settings, &JsValue::from_str("headers"), &Object::new());
        Self::ajax_setup(&settings);
        self.installed = false;
    }
}
