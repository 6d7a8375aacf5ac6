//! Page-level cache busting.
//!
//! DESIGN
//! ======
//! On attach the component:
//! 1. writes no-cache `<meta http-equiv>` tags,
//! 2. routes outgoing requests through the `NoCachePolicy` via every
//!    configured `RequestHooks`,
//! 3. rewrites stylesheet and script URLs with the page token, unless this
//!    load was itself a reload, skipping the runtime's own entry script.
//!
//! It also owns the Ctrl+Shift+R hard-reload shortcut and, when configured,
//! the periodic freshness probe.

#[cfg(test)]
#[path = "cache_buster_test.rs"]
mod cache_buster_test;

use crate::dom::{AssetDom, NavigationKind, Scheduler};
use crate::events::{Component, ComponentId, EventKind, KeyChord, Propagation, Subscriptions, TimerId, UiEvent};
use crate::net::no_cache::{NO_CACHE_HEADERS, NoCachePolicy, RequestHooks};
use crate::net::update_check::{UpdateDecision, UpdateWatcher};
use crate::util::cache_bust::{CacheBustToken, bust_asset_url, is_main_entry};

/// Substring identifying the runtime's own bootstrap script.
pub const MAIN_ENTRY_MARKER: &str = "divine_client";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheBusterConfig {
    pub main_entry_marker: String,
    /// Probe period; `None` disables the freshness check.
    pub update_check_ms: Option<u32>,
}

impl Default for CacheBusterConfig {
    fn default() -> Self {
        Self { main_entry_marker: MAIN_ENTRY_MARKER.to_owned(), update_check_ms: None }
    }
}

pub struct CacheBuster {
    policy: NoCachePolicy,
    config: CacheBusterConfig,
    hooks: Vec<Box<dyn RequestHooks>>,
    hooks_installed: bool,
    assets_rewritten: bool,
    watcher: UpdateWatcher,
    timer: Option<TimerId>,
}

impl std::fmt::Debug for CacheBuster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheBuster")
            .field("policy", &self.policy)
            .field("config", &self.config)
            .field("hooks", &self.hooks.iter().map(|h| h.name()).collect::<Vec<_>>())
            .field("hooks_installed", &self.hooks_installed)
            .field("assets_rewritten", &self.assets_rewritten)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl CacheBuster {
    #[must_use]
    pub fn new(token: CacheBustToken, config: CacheBusterConfig) -> Self {
        Self {
            policy: NoCachePolicy::new(token),
            config,
            hooks: Vec::new(),
            hooks_installed: false,
            assets_rewritten: false,
            watcher: UpdateWatcher::new(),
            timer: None,
        }
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: impl IntoIterator<Item = Box<dyn RequestHooks>>) -> Self {
        self.hooks.extend(hooks);
        self
    }

    #[must_use]
    pub fn policy(&self) -> NoCachePolicy {
        self.policy
    }

    #[must_use]
    pub fn watcher(&self) -> &UpdateWatcher {
        &self.watcher
    }

    pub fn ensure_meta_tags<D: AssetDom + ?Sized>(doc: &mut D) {
        for (name, content) in NO_CACHE_HEADERS {
            doc.ensure_meta_http_equiv(name, content);
        }
    }

    /// Install every request hook once.
    pub fn install_hooks(&mut self) {
        if self.hooks_installed {
            return;
        }
        for hook in &mut self.hooks {
            hook.install(self.policy);
            log::debug!("cache: request hook '{}' installed", hook.name());
        }
        self.hooks_installed = true;
    }

    pub fn uninstall_hooks(&mut self) {
        if !self.hooks_installed {
            return;
        }
        for hook in &mut self.hooks {
            hook.uninstall();
        }
        self.hooks_installed = false;
    }

    /// Rewrite stylesheet and script URLs with the page token. Runs at most
    /// once per page and never after a reload. Returns the number of URLs
    /// changed.
    pub fn rewrite_assets<D: AssetDom + ?Sized>(&mut self, doc: &mut D) -> usize {
        if self.assets_rewritten || doc.navigation_kind() == NavigationKind::Reload {
            return 0;
        }
        self.assets_rewritten = true;
        let token = self.policy.token();
        let mut changed = 0;

        for (index, url) in doc.stylesheet_urls().iter().enumerate() {
            doc.set_stylesheet_url(index, &bust_asset_url(url, token));
            changed += 1;
        }
        for (index, url) in doc.script_urls().iter().enumerate() {
            if is_main_entry(url, &self.config.main_entry_marker) {
                continue;
            }
            doc.set_script_url(index, &bust_asset_url(url, token));
            changed += 1;
        }
        log::debug!("cache: rewrote {changed} asset urls");
        changed
    }

    /// Ctrl+Shift+R forces a reload that bypasses the cache.
    pub fn on_key<D: AssetDom + ?Sized>(&self, chord: &KeyChord, doc: &mut D) -> Propagation {
        if chord.ctrl && chord.shift && !chord.alt && chord.key.eq_ignore_ascii_case("r") {
            doc.reload(true);
            return Propagation::PreventDefault;
        }
        Propagation::Continue
    }

    fn start_update_timer<D: Scheduler + ?Sized>(&mut self, doc: &mut D, period_ms: u32) {
        if let Some(old) = self.timer.take() {
            doc.clear_interval(old);
        }
        self.timer = doc.set_interval(period_ms);
        if self.timer.is_none() {
            log::warn!("cache: could not start update check timer");
        }
    }
}

impl<D: AssetDom + Scheduler + ?Sized> Component<D> for CacheBuster {
    fn id(&self) -> ComponentId {
        ComponentId::CacheBuster
    }

    fn attach(&mut self, doc: &mut D, subs: &mut Subscriptions) {
        Self::ensure_meta_tags(doc);
        self.install_hooks();
        self.rewrite_assets(doc);
        subs.subscribe(ComponentId::CacheBuster, EventKind::KeyDown);

        if let Some(period_ms) = self.config.update_check_ms.filter(|ms| *ms > 0) {
            self.start_update_timer(doc, period_ms);
            subs.subscribe(ComponentId::CacheBuster, EventKind::Timer);
            subs.subscribe(ComponentId::CacheBuster, EventKind::UpdateChecked);
        }
    }

    fn handle(&mut self, event: &UiEvent, doc: &mut D) -> Propagation {
        match event {
            UiEvent::KeyDown(chord) => self.on_key(chord, doc),
            UiEvent::TimerFired(id) if self.timer == Some(*id) => {
                doc.probe_last_modified();
                Propagation::Continue
            }
            UiEvent::UpdateChecked(outcome) => {
                if self.watcher.observe(outcome) == UpdateDecision::Reload {
                    doc.reload(true);
                }
                Propagation::Continue
            }
            _ => Propagation::Continue,
        }
    }

    fn detach(&mut self, doc: &mut D, subs: &mut Subscriptions) {
        if let Some(id) = self.timer.take() {
            doc.clear_interval(id);
        }
        self.uninstall_hooks();
        subs.unsubscribe_all(ComponentId::CacheBuster);
    }
}
