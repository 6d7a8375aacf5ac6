//! In-memory document for unit tests.

use std::collections::HashMap;

use super::{AssetDom, FormDom, NavigationKind, Scheduler, TextDom};
use crate::events::TimerId;
use crate::state::forms::{FieldRef, FormPanel};
use crate::util::validate::FieldStatus;

#[derive(Clone, Debug, Default)]
pub struct MemoryField {
    pub value: String,
    pub border: String,
    pub message: String,
    pub masked: bool,
    pub toggles: Vec<String>,
}

impl MemoryField {
    fn new(secret: bool) -> Self {
        Self { masked: secret, ..Self::default() }
    }
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    pub panels: HashMap<FormPanel, bool>,
    pub fields: HashMap<FieldRef, MemoryField>,
    pub alerts: Vec<String>,
    pub focused: Option<FieldRef>,
    pub texts: HashMap<String, String>,
    pub active_timers: Vec<(TimerId, u32)>,
    pub cleared_timers: Vec<TimerId>,
    next_timer: i32,
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    pub meta: Vec<(String, String)>,
    pub navigation: NavigationKind,
    pub reloads: Vec<bool>,
    pub probes: usize,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Auth page: three panels, all hidden until a controller shows one.
    #[must_use]
    pub fn auth_page() -> Self {
        let mut doc = Self::new();
        for panel in FormPanel::ALL {
            doc.panels.insert(panel, false);
            for field in panel.fields() {
                doc.fields.insert(FieldRef::new(panel, *field), MemoryField::new(field.is_secret()));
            }
        }
        doc.stylesheets = vec!["/data/css/menu2.css".into(), "/data/css/login.css".into()];
        doc
    }

    /// Home page: banner text plus both navigation buttons.
    #[must_use]
    pub fn home_page() -> Self {
        let mut doc = Self::new();
        for id in ["dynamic-menu1-text", "prev-btn", "next-btn"] {
            doc.texts.insert(id.into(), String::new());
        }
        doc.stylesheets =
            vec!["/data/css/index.css?old=1".into(), "/data/css/menu1.css".into(), "/data/css/menu2.css".into()];
        doc.scripts = vec!["/data/js/menu.js?v=1".into(), "/pkg/divine_client.js".into()];
        doc
    }

    pub fn set_value(&mut self, field: FieldRef, value: &str) {
        if let Some(f) = self.fields.get_mut(&field) {
            value.clone_into(&mut f.value);
        }
    }

    #[must_use]
    pub fn field(&self, field: FieldRef) -> &MemoryField {
        &self.fields[&field]
    }

    #[must_use]
    pub fn visible_panels(&self) -> Vec<FormPanel> {
        FormPanel::ALL.into_iter().filter(|p| self.panels.get(p).copied().unwrap_or(false)).collect()
    }

    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }
}

impl FormDom for MemoryDocument {
    fn has_panel(&self, panel: FormPanel) -> bool {
        self.panels.contains_key(&panel)
    }

    fn set_panel_visible(&mut self, panel: FormPanel, visible: bool) {
        if let Some(v) = self.panels.get_mut(&panel) {
            *v = visible;
        }
    }

    fn field_value(&self, field: FieldRef) -> Option<String> {
        self.fields.get(&field).map(|f| f.value.clone())
    }

    fn set_field_status(&mut self, field: FieldRef, status: FieldStatus) {
        if let Some(f) = self.fields.get_mut(&field) {
            status.border_color().clone_into(&mut f.border);
            status.message().clone_into(&mut f.message);
        }
    }

    fn focus_field(&mut self, field: FieldRef) {
        self.focused = Some(field);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }

    fn password_fields(&self, panel: FormPanel) -> Vec<FieldRef> {
        panel
            .fields()
            .iter()
            .map(|field| FieldRef::new(panel, *field))
            .filter(|field| field.field.is_secret() && self.fields.contains_key(field))
            .collect()
    }

    fn has_visibility_toggle(&self, field: FieldRef) -> bool {
        self.fields.get(&field).is_some_and(|f| !f.toggles.is_empty())
    }

    fn append_visibility_toggle(&mut self, field: FieldRef, icon: &str) {
        if let Some(f) = self.fields.get_mut(&field) {
            f.toggles.push(icon.to_owned());
        }
    }

    fn is_masked(&self, field: FieldRef) -> bool {
        self.fields.get(&field).is_some_and(|f| f.masked)
    }

    fn set_masked(&mut self, field: FieldRef, masked: bool) {
        if let Some(f) = self.fields.get_mut(&field) {
            f.masked = masked;
        }
    }

    fn set_toggle_icon(&mut self, field: FieldRef, icon: &str) {
        if let Some(last) = self.fields.get_mut(&field).and_then(|f| f.toggles.last_mut()) {
            icon.clone_into(last);
        }
    }
}

impl TextDom for MemoryDocument {
    fn has_element(&self, id: &str) -> bool {
        self.texts.contains_key(id)
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(t) = self.texts.get_mut(id) {
            text.clone_into(t);
        }
    }
}

impl Scheduler for MemoryDocument {
    fn set_interval(&mut self, period_ms: u32) -> Option<TimerId> {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.active_timers.push((id, period_ms));
        Some(id)
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.active_timers.retain(|(t, _)| *t != id);
        self.cleared_timers.push(id);
    }
}

impl AssetDom for MemoryDocument {
    fn stylesheet_urls(&self) -> Vec<String> {
        self.stylesheets.clone()
    }

    fn set_stylesheet_url(&mut self, index: usize, url: &str) {
        if let Some(s) = self.stylesheets.get_mut(index) {
            url.clone_into(s);
        }
    }

    fn script_urls(&self) -> Vec<String> {
        self.scripts.clone()
    }

    fn set_script_url(&mut self, index: usize, url: &str) {
        if let Some(s) = self.scripts.get_mut(index) {
            url.clone_into(s);
        }
    }

    fn ensure_meta_http_equiv(&mut self, name: &str, content: &str) {
        match self.meta.iter_mut().find(|(n, _)| n == name) {
            Some((_, c)) => content.clone_into(c),
            None => self.meta.push((name.to_owned(), content.to_owned())),
        }
    }

    fn navigation_kind(&self) -> NavigationKind {
        self.navigation
    }

    fn reload(&mut self, bypass_cache: bool) {
        self.reloads.push(bypass_cache);
    }

    fn probe_last_modified(&mut self) {
        self.probes += 1;
    }
}
