//! Document ports used by the page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components never hold DOM nodes. Each one is written against the narrow
//! port it needs (`FormDom`, `TextDom`, `Scheduler`, `AssetDom`), and the
//! page runtime requires the union, `Document`. `browser` implements the
//! ports on `web-sys` for the wasm build; `memory` backs the unit tests.

#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(test)]
pub(crate) mod memory;

use crate::events::TimerId;
use crate::state::forms::{FieldRef, FormPanel};
use crate::util::validate::FieldStatus;

/// Auth page forms: panels, inputs, feedback and password toggles.
pub trait FormDom {
    fn has_panel(&self, panel: FormPanel) -> bool;

    fn set_panel_visible(&mut self, panel: FormPanel, visible: bool);

    /// Current value of an input, `None` when the input is not in the page.
    fn field_value(&self, field: FieldRef) -> Option<String>;

    /// Apply border color and custom validity message for `status`.
    fn set_field_status(&mut self, field: FieldRef, status: FieldStatus);

    fn focus_field(&mut self, field: FieldRef);

    /// Blocking user-facing message.
    fn alert(&mut self, message: &str);

    /// Inputs of `type="password"` inside the panel's form, document order.
    fn password_fields(&self, panel: FormPanel) -> Vec<FieldRef>;

    fn has_visibility_toggle(&self, field: FieldRef) -> bool;

    /// Append a toggle control inside the input's box.
    fn append_visibility_toggle(&mut self, field: FieldRef, icon: &str);

    fn is_masked(&self, field: FieldRef) -> bool;

    fn set_masked(&mut self, field: FieldRef, masked: bool);

    fn set_toggle_icon(&mut self, field: FieldRef, icon: &str);
}

/// Plain text elements addressed by id.
pub trait TextDom {
    fn has_element(&self, id: &str) -> bool;

    fn set_text(&mut self, id: &str, text: &str);
}

/// Repeating timers. Expiry is reported back as `UiEvent::TimerFired`.
pub trait Scheduler {
    /// Start an interval; `None` if the environment refused.
    fn set_interval(&mut self, period_ms: u32) -> Option<TimerId>;

    fn clear_interval(&mut self, id: TimerId);
}

/// How the current page load was triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationKind {
    #[default]
    Navigate,
    Reload,
    BackForward,
}

impl NavigationKind {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "reload" => Self::Reload,
            "back_forward" => Self::BackForward,
            _ => Self::Navigate,
        }
    }
}

/// Head assets and page-level navigation.
pub trait AssetDom {
    fn stylesheet_urls(&self) -> Vec<String>;

    fn set_stylesheet_url(&mut self, index: usize, url: &str);

    /// `src` of every script that has one, document order.
    fn script_urls(&self) -> Vec<String>;

    fn set_script_url(&mut self, index: usize, url: &str);

    /// Create or update `<meta http-equiv=name content=content>`.
    fn ensure_meta_http_equiv(&mut self, name: &str, content: &str);

    fn navigation_kind(&self) -> NavigationKind;

    fn reload(&mut self, bypass_cache: bool);

    /// Start a HEAD request for the current page. The outcome is reported as
    /// `UiEvent::UpdateChecked`.
    fn probe_last_modified(&mut self);
}

/// Everything the page runtime needs from its environment.
pub trait Document: FormDom + TextDom + Scheduler + AssetDom {}

impl<T: FormDom + TextDom + Scheduler + AssetDom> Document for T {}
