//! Auth panel identity and the visible-panel state machine.
//!
//! DESIGN
//! ======
//! The page carries three mutually exclusive panels. `PanelState` always
//! names exactly one of them; switching is a single named transition so the
//! "one visible panel" rule cannot be broken by field mutation.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::util::validate::Field;

/// One of the three form views on the auth page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormPanel {
    #[default]
    Login,
    Register,
    ForgotPassword,
}

impl FormPanel {
    pub const ALL: [Self; 3] = [Self::Login, Self::Register, Self::ForgotPassword];

    /// Id of the wrapper element holding the panel's form.
    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Login => "loginFormContent",
            Self::Register => "registerFormContent",
            Self::ForgotPassword => "forgotFormContent",
        }
    }

    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.element_id() == id)
    }

    /// Value of the `for` attribute on labels that switch to this panel.
    #[must_use]
    pub fn label_target(self) -> &'static str {
        match self {
            Self::Login => "loginForm",
            Self::Register => "registerForm",
            Self::ForgotPassword => "forgotForm",
        }
    }

    #[must_use]
    pub fn from_label_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.label_target() == target)
    }

    /// Short slug used in markup data attributes.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::ForgotPassword => "forgot",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.slug() == slug)
    }

    /// Inputs rendered inside the panel's form, in document order.
    #[must_use]
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Login => &[Field::Username, Field::Password],
            Self::Register => &Field::REGISTER_ORDER,
            Self::ForgotPassword => &[Field::Email],
        }
    }
}

/// An input inside a specific panel's form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub panel: FormPanel,
    pub field: Field,
}

impl FieldRef {
    #[must_use]
    pub fn new(panel: FormPanel, field: Field) -> Self {
        Self { panel, field }
    }

    #[must_use]
    pub fn register(field: Field) -> Self {
        Self::new(FormPanel::Register, field)
    }

    #[must_use]
    pub fn login(field: Field) -> Self {
        Self::new(FormPanel::Login, field)
    }
}

/// Which panel is currently shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    visible: FormPanel,
}

impl PanelState {
    #[must_use]
    pub fn new(initial: FormPanel) -> Self {
        Self { visible: initial }
    }

    #[must_use]
    pub fn visible(self) -> FormPanel {
        self.visible
    }

    #[must_use]
    pub fn is_visible(self, panel: FormPanel) -> bool {
        self.visible == panel
    }

    /// Switch to `panel`. Returns `true` when the visible panel changed.
    pub fn show(&mut self, panel: FormPanel) -> bool {
        let changed = self.visible != panel;
        self.visible = panel;
        changed
    }
}
