//! `web-sys` implementation of the document ports and the wasm entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! `start` runs once the bootstrap module loads the bundle (end of `<body>`,
//! so the DOM is already parsed). It builds one `PageRuntime` around a
//! `BrowserDocument`, attaches it, and installs four delegated listeners on
//! the document (`input`, `submit`, `click`, `keydown`) that translate DOM
//! events into `UiEvent`s.
//!
//! Timer and probe callbacks reach the runtime through a `Weak` handle so a
//! dropped runtime simply stops receiving events.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{AssetDom, FormDom, NavigationKind, Scheduler, TextDom};
use crate::app::{INITIAL_PANEL_ATTR, UPDATE_CHECK_ATTR};
use crate::components::cache_buster::CacheBusterConfig;
use crate::events::{ClickTarget, KeyChord, TimerId, UiEvent};
use crate::net::request_hooks::{FetchHook, JqueryAjaxHook};
use crate::runtime::{PageConfig, PageRuntime, SharedRuntime, dispatch_shared};
use crate::state::forms::{FieldRef, FormPanel};
use crate::util::cache_bust::{CacheBustToken, REQUEST_PARAM, append_query_param};
use crate::util::validate::{Field, FieldStatus};

type Runtime = PageRuntime<BrowserDocument>;
type RuntimeHandle = SharedRuntime<BrowserDocument>;

const TOGGLE_CLASS: &str = "toggle-password";
const TOGGLE_PANEL_ATTR: &str = "data-panel";
const TOGGLE_FIELD_ATTR: &str = "data-field";

thread_local! {
    static RUNTIME: RefCell<Option<Rc<RefCell<Runtime>>>> = const { RefCell::new(None) };
}

// =============================================================================
// DOCUMENT
// =============================================================================

pub struct BrowserDocument {
    window: web_sys::Window,
    document: web_sys::Document,
    runtime: RuntimeHandle,
    timers: HashMap<i32, Closure<dyn FnMut()>>,
}

impl BrowserDocument {
    fn new(window: web_sys::Window, document: web_sys::Document, runtime: RuntimeHandle) -> Self {
        Self { window, document, runtime, timers: HashMap::new() }
    }

    fn query(&self, selector: &str) -> Option<web_sys::Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<web_sys::Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length()).filter_map(|i| list.item(i)).filter_map(|n| n.dyn_into::<web_sys::Element>().ok()).collect()
    }

    fn input(&self, field: FieldRef) -> Option<web_sys::HtmlInputElement> {
        let selector = format!(r#"#{} [name="{}"]"#, field.panel.element_id(), field.field.name());
        self.query(&selector)?.dyn_into::<web_sys::HtmlInputElement>().ok()
    }

    fn toggle(&self, field: FieldRef) -> Option<web_sys::Element> {
        self.input(field)?.parent_element()?.query_selector(&format!(".{TOGGLE_CLASS}")).ok().flatten()
    }
}

impl std::fmt::Debug for BrowserDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserDocument").field("timers", &self.timers.len()).finish_non_exhaustive()
    }
}

impl FormDom for BrowserDocument {
    fn has_panel(&self, panel: FormPanel) -> bool {
        self.document.get_element_by_id(panel.element_id()).is_some()
    }

    fn set_panel_visible(&mut self, panel: FormPanel, visible: bool) {
        let Some(el) = self.document.get_element_by_id(panel.element_id()) else {
            return;
        };
        if let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() {
            let _ = el.style().set_property("display", if visible { "block" } else { "none" });
        }
    }

    fn field_value(&self, field: FieldRef) -> Option<String> {
        self.input(field).map(|input| input.value())
    }

    fn set_field_status(&mut self, field: FieldRef, status: FieldStatus) {
        if let Some(input) = self.input(field) {
            let _ = input.style().set_property("border-color", status.border_color());
            input.set_custom_validity(status.message());
        }
    }

    fn focus_field(&mut self, field: FieldRef) {
        if let Some(input) = self.input(field) {
            let _ = input.focus();
        }
    }

    fn alert(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn password_fields(&self, panel: FormPanel) -> Vec<FieldRef> {
        self.query_all(&format!(r#"#{} input[type="password"]"#, panel.element_id()))
            .iter()
            .filter_map(|el| el.get_attribute("name"))
            .filter_map(|name| Field::from_name(&name))
            .map(|field| FieldRef::new(panel, field))
            .collect()
    }

    fn has_visibility_toggle(&self, field: FieldRef) -> bool {
        self.toggle(field).is_some()
    }

    fn append_visibility_toggle(&mut self, field: FieldRef, icon: &str) {
        let Some(container) = self.input(field).and_then(|input| input.parent_element()) else {
            return;
        };
        let Ok(toggle) = self.document.create_element("span") else {
            return;
        };
        toggle.set_class_name(TOGGLE_CLASS);
        let _ = toggle.set_attribute(TOGGLE_PANEL_ATTR, field.panel.slug());
        let _ = toggle.set_attribute(TOGGLE_FIELD_ATTR, field.field.name());
        let _ = toggle.set_attribute("role", "button");
        toggle.set_text_content(Some(icon));
        let _ = container.append_child(&toggle);
    }

    fn is_masked(&self, field: FieldRef) -> bool {
        self.input(field).is_some_and(|input| input.type_() == "password")
    }

    fn set_masked(&mut self, field: FieldRef, masked: bool) {
        if let Some(input) = self.input(field) {
            input.set_type(if masked { "password" } else { "text" });
        }
    }

    fn set_toggle_icon(&mut self, field: FieldRef, icon: &str) {
        if let Some(toggle) = self.toggle(field) {
            toggle.set_text_content(Some(icon));
        }
    }
}

impl TextDom for BrowserDocument {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl Scheduler for BrowserDocument {
    fn set_interval(&mut self, period_ms: u32) -> Option<TimerId> {
        let slot = Rc::new(Cell::new(0));
        let fired = Rc::clone(&slot);
        let handle = self.runtime.clone();
        let cb = Closure::wrap(Box::new(move || {
            dispatch_shared(&handle, &UiEvent::TimerFired(TimerId(fired.get())));
        }) as Box<dyn FnMut()>);

        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), timeout)
        {
            Ok(id) => {
                slot.set(id);
                self.timers.insert(id, cb);
                Some(TimerId(id))
            }
            Err(e) => {
                log::warn!("setInterval failed: {e:?}");
                None
            }
        }
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.window.clear_interval_with_handle(id.0);
        self.timers.remove(&id.0);
    }
}

impl AssetDom for BrowserDocument {
    fn stylesheet_urls(&self) -> Vec<String> {
        self.query_all(r#"link[rel="stylesheet"]"#).iter().map(|el| el.get_attribute("href").unwrap_or_default()).collect()
    }

    fn set_stylesheet_url(&mut self, index: usize, url: &str) {
        if let Some(el) = self.query_all(r#"link[rel="stylesheet"]"#).get(index) {
            let _ = el.set_attribute("href", url);
        }
    }

    fn script_urls(&self) -> Vec<String> {
        self.query_all("script[src]").iter().filter_map(|el| el.get_attribute("src")).collect()
    }

    fn set_script_url(&mut self, index: usize, url: &str) {
        if let Some(el) = self.query_all("script[src]").get(index) {
            let _ = el.set_attribute("src", url);
        }
    }

    fn ensure_meta_http_equiv(&mut self, name: &str, content: &str) {
        if let Some(meta) = self.query(&format!(r#"meta[http-equiv="{name}"]"#)) {
            let _ = meta.set_attribute("content", content);
            return;
        }
        let (Some(head), Ok(meta)) = (self.document.head(), self.document.create_element("meta")) else {
            return;
        };
        let _ = meta.set_attribute("http-equiv", name);
        let _ = meta.set_attribute("content", content);
        let _ = head.append_child(&meta);
    }

    fn navigation_kind(&self) -> NavigationKind {
        let Some(performance) = self.window.performance() else {
            return NavigationKind::Navigate;
        };
        let entry = performance.get_entries_by_type("navigation").get(0);
        js_sys::Reflect::get(&entry, &JsValue::from_str("type"))
            .ok()
            .and_then(|t| t.as_string())
            .map_or(NavigationKind::Navigate, |t| NavigationKind::parse(&t))
    }

    fn reload(&mut self, bypass_cache: bool) {
        let location = self.window.location();
        let result = if bypass_cache { location.reload_with_forceget(true) } else { location.reload() };
        if let Err(e) = result {
            log::warn!("reload failed: {e:?}");
        }
    }

    fn probe_last_modified(&mut self) {
        let Ok(href) = self.window.location().href() else {
            return;
        };
        let url = append_query_param(&href, REQUEST_PARAM, &CacheBustToken::now().to_string());
        let handle = self.runtime.clone();
        // Nothing is mounted, so Leptos has no executor; spawn on the JS microtask queue.
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = gloo_net::http::RequestBuilder::new(&url)
                .method(gloo_net::http::Method::HEAD)
                .header("Cache-Control", "no-cache")
                .send()
                .await
                .map(|resp| resp.headers().get("last-modified"))
                .map_err(|e| e.to_string());
            dispatch_shared(&handle, &UiEvent::UpdateChecked(outcome));
        });
    }
}

// =============================================================================
// EVENT TRANSLATION
// =============================================================================

fn event_element(event: &web_sys::Event) -> Option<web_sys::Element> {
    event.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok())
}

fn enclosing_panel(el: &web_sys::Element) -> Option<FormPanel> {
    let wrapper = el.closest(".wrapper").ok().flatten()?;
    FormPanel::from_element_id(&wrapper.id())
}

fn input_event(event: &web_sys::Event) -> Option<UiEvent> {
    let el = event_element(event)?;
    let field = Field::from_name(&el.get_attribute("name")?)?;
    Some(UiEvent::Input(FieldRef::new(enclosing_panel(&el)?, field)))
}

fn submit_event(event: &web_sys::Event) -> Option<UiEvent> {
    Some(UiEvent::Submit(enclosing_panel(&event_element(event)?)?))
}

fn click_event(event: &web_sys::Event) -> Option<UiEvent> {
    let el = event_element(event)?;
    if let Some(toggle) = el.closest(&format!(".{TOGGLE_CLASS}")).ok().flatten() {
        let panel = FormPanel::from_slug(&toggle.get_attribute(TOGGLE_PANEL_ATTR)?)?;
        let field = Field::from_name(&toggle.get_attribute(TOGGLE_FIELD_ATTR)?)?;
        return Some(UiEvent::Click(ClickTarget::Toggle(FieldRef::new(panel, field))));
    }
    if let Some(label) = el.closest("label[for]").ok().flatten() {
        return Some(UiEvent::Click(ClickTarget::Label { for_attr: label.get_attribute("for")? }));
    }
    let target = match el.id() {
        id if id.is_empty() => ClickTarget::Other,
        id => ClickTarget::Element { id },
    };
    Some(UiEvent::Click(target))
}

fn keydown_event(event: &web_sys::Event) -> Option<UiEvent> {
    let key = event.dyn_ref::<web_sys::KeyboardEvent>()?;
    Some(UiEvent::KeyDown(KeyChord { ctrl: key.ctrl_key(), shift: key.shift_key(), alt: key.alt_key(), key: key.key() }))
}

fn listen(document: &web_sys::Document, handle: &RuntimeHandle, kind: &str, translate: fn(&web_sys::Event) -> Option<UiEvent>) {
    let handle = handle.clone();
    let cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let Some(ui_event) = translate(&event) else {
            return;
        };
        if dispatch_shared(&handle, &ui_event).prevented() {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    if let Err(e) = document.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref()) {
        log::warn!("could not listen for {kind}: {e:?}");
    }
    cb.forget();
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn read_config(document: &web_sys::Document) -> PageConfig {
    let body = document.body();
    let attr = |name: &str| body.as_ref().and_then(|b| b.get_attribute(name));

    let initial_panel = attr(INITIAL_PANEL_ATTR).and_then(|slug| FormPanel::from_slug(&slug)).unwrap_or_default();
    let update_check_ms = attr(UPDATE_CHECK_ATTR)
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|secs| *secs > 0)
        .map(|secs| secs.saturating_mul(1000));

    PageConfig {
        initial_panel,
        cache: CacheBusterConfig { update_check_ms, ..CacheBusterConfig::default() },
        ..PageConfig::default()
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let config = read_config(&document);

    let runtime = Rc::new_cyclic(|handle: &RuntimeHandle| {
        let doc = BrowserDocument::new(window.clone(), document.clone(), handle.clone());
        RefCell::new(
            PageRuntime::new(doc, config)
                .with_request_hooks(vec![Box::new(FetchHook::default()), Box::new(JqueryAjaxHook::default())]),
        )
    });
    runtime.borrow_mut().init();

    let handle = Rc::downgrade(&runtime);
    listen(&document, &handle, "input", input_event);
    listen(&document, &handle, "submit", submit_event);
    listen(&document, &handle, "click", click_event);
    listen(&document, &handle, "keydown", keydown_event);

    RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime));
}
