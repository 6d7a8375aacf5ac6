//! Page runtime: owns the document, the listener table and the three page
//! components, and routes every `UiEvent` to the components subscribed to
//! its kind.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser binding builds one `PageRuntime` per page load, calls `init`
//! once the DOM is ready, and forwards DOM events through `dispatch`.
//! Components that find nothing to bind to (no forms on the home page, no
//! banner on the auth page) register no listeners and stay inert.

#[cfg(test)]
#[path = "runtime_test.rs"]
mod runtime_test;

use std::cell::RefCell;
use std::rc::Weak;

use crate::components::auth_forms::AuthForms;
use crate::components::banner::RotatingBanner;
use crate::components::cache_buster::{CacheBuster, CacheBusterConfig};
use crate::dom::Document;
use crate::events::{Component, ComponentId, Propagation, Subscriptions, UiEvent};
use crate::net::no_cache::RequestHooks;
use crate::state::banner::{BannerState, DEFAULT_INTERVAL_MS};
use crate::state::forms::FormPanel;
use crate::util::cache_bust::CacheBustToken;

/// Handle held by timer, probe and DOM callbacks. A dropped runtime simply
/// stops receiving events.
pub type SharedRuntime<D> = Weak<RefCell<PageRuntime<D>>>;

/// Startup parameters read from the server-rendered page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageConfig {
    pub initial_panel: FormPanel,
    pub banner: BannerState,
    pub banner_interval_ms: u32,
    pub cache: CacheBusterConfig,
    pub token: CacheBustToken,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            initial_panel: FormPanel::Login,
            banner: BannerState::default(),
            banner_interval_ms: DEFAULT_INTERVAL_MS,
            cache: CacheBusterConfig::default(),
            token: CacheBustToken::now(),
        }
    }
}

#[derive(Debug)]
pub struct PageRuntime<D> {
    doc: D,
    subs: Subscriptions,
    cache: CacheBuster,
    auth: AuthForms,
    banner: RotatingBanner,
    attached: bool,
}

impl<D: Document> PageRuntime<D> {
    pub fn new(doc: D, config: PageConfig) -> Self {
        Self {
            doc,
            subs: Subscriptions::new(),
            cache: CacheBuster::new(config.token, config.cache),
            auth: AuthForms::new(config.initial_panel),
            banner: RotatingBanner::new(config.banner, config.banner_interval_ms),
            attached: false,
        }
    }

    #[must_use]
    pub fn with_request_hooks(mut self, hooks: Vec<Box<dyn RequestHooks>>) -> Self {
        self.cache = self.cache.with_hooks(hooks);
        self
    }

    /// Attach every component. Calling it again re-runs each component's
    /// attach, which never duplicates toggles, timers or listeners.
    pub fn init(&mut self) {
        self.cache.attach(&mut self.doc, &mut self.subs);
        self.auth.attach(&mut self.doc, &mut self.subs);
        self.banner.attach(&mut self.doc, &mut self.subs);
        if !self.attached {
            log::info!("page runtime attached ({} listeners)", self.subs.len());
        }
        self.attached = true;
    }

    /// Deliver `event` to every subscribed component in registration order.
    pub fn dispatch(&mut self, event: &UiEvent) -> Propagation {
        let mut outcome = Propagation::Continue;
        for component in self.subs.listeners(event.kind()) {
            let answer = match component {
                ComponentId::CacheBuster => self.cache.handle(event, &mut self.doc),
                ComponentId::AuthForms => self.auth.handle(event, &mut self.doc),
                ComponentId::Banner => self.banner.handle(event, &mut self.doc),
            };
            outcome = outcome.merge(answer);
        }
        outcome
    }

    /// Detach every component, clearing timers, hooks and listeners.
    pub fn teardown(&mut self) {
        self.banner.detach(&mut self.doc, &mut self.subs);
        self.auth.detach(&mut self.doc, &mut self.subs);
        self.cache.detach(&mut self.doc, &mut self.subs);
        self.attached = false;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    #[must_use]
    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subs
    }

    #[must_use]
    pub fn auth_forms(&self) -> &AuthForms {
        &self.auth
    }

    #[must_use]
    pub fn banner(&self) -> &RotatingBanner {
        &self.banner
    }
}

/// Deliver `event` through a shared handle. An event that arrives while an
/// outer dispatch still holds the runtime is logged and dropped; the runtime
/// stays usable for the next one.
pub fn dispatch_shared<D: Document>(handle: &SharedRuntime<D>, event: &UiEvent) -> Propagation {
    let Some(runtime) = handle.upgrade() else {
        return Propagation::Continue;
    };
    let outcome = match runtime.try_borrow_mut() {
        Ok(mut runtime) => runtime.dispatch(event),
        Err(_) => {
            log::warn!("dropped re-entrant {:?} event", event.kind());
            Propagation::Continue
        }
    };
    outcome
}
