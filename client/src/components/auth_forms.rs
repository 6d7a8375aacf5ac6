//! Auth panel controller: panel switching, live validation, submit guard and
//! password visibility toggles.
//!
//! DESIGN
//! ======
//! One `AuthForms` value owns the visible-panel state for the page. Live
//! feedback only runs on the register form; the login and forgot forms rely
//! on native `required` plus the server-side checks. Submission of the
//! register form is guarded by `check_register` in fixed field order.

#[cfg(test)]
#[path = "auth_forms_test.rs"]
mod auth_forms_test;

use crate::dom::FormDom;
use crate::events::{ClickTarget, Component, ComponentId, EventKind, Propagation, Subscriptions, UiEvent};
use crate::net::types::RegisterForm;
use crate::state::forms::{FieldRef, FormPanel, PanelState};
use crate::util::validate::{Field, FieldStatus, check_register, live_status};

/// Toggle icon while the password is hidden.
pub const ICON_MASKED: &str = "👁️";
/// Toggle icon while the password is shown.
pub const ICON_REVEALED: &str = "🙈";

fn toggle_icon(masked: bool) -> &'static str {
    if masked { ICON_MASKED } else { ICON_REVEALED }
}

#[derive(Debug, Default)]
pub struct AuthForms {
    panels: PanelState,
}

impl AuthForms {
    #[must_use]
    pub fn new(initial: FormPanel) -> Self {
        Self { panels: PanelState::new(initial) }
    }

    #[must_use]
    pub fn visible(&self) -> FormPanel {
        self.panels.visible()
    }

    /// Show `panel` and hide the other two.
    pub fn show<D: FormDom + ?Sized>(&mut self, panel: FormPanel, doc: &mut D) {
        if self.panels.show(panel) {
            log::debug!("auth: switching to {} panel", panel.slug());
        }
        for p in FormPanel::ALL {
            if doc.has_panel(p) {
                doc.set_panel_visible(p, p == panel);
            }
        }
    }

    /// Attach a visibility toggle to every register password input and to the
    /// first login password input. Inputs that already carry one are skipped.
    /// Returns how many toggles were added.
    pub fn install_toggles<D: FormDom + ?Sized>(&self, doc: &mut D) -> usize {
        let mut targets = doc.password_fields(FormPanel::Register);
        targets.extend(doc.password_fields(FormPanel::Login).into_iter().take(1));

        let mut added = 0;
        for field in targets {
            if doc.has_visibility_toggle(field) {
                continue;
            }
            let icon = toggle_icon(doc.is_masked(field));
            doc.append_visibility_toggle(field, icon);
            added += 1;
        }
        added
    }

    pub fn toggle_visibility<D: FormDom + ?Sized>(&self, field: FieldRef, doc: &mut D) {
        let masked = !doc.is_masked(field);
        doc.set_masked(field, masked);
        doc.set_toggle_icon(field, toggle_icon(masked));
    }

    /// Live feedback for one register input. A password change re-checks the
    /// confirmation field when it already has content or the password was
    /// cleared.
    pub fn on_input<D: FormDom + ?Sized>(&self, field: FieldRef, doc: &mut D) {
        if field.panel != FormPanel::Register {
            return;
        }
        let Some(value) = doc.field_value(field) else {
            return;
        };
        let password = doc.field_value(FieldRef::register(Field::Password)).unwrap_or_default();
        doc.set_field_status(field, live_status(field.field, &value, &password));

        if field.field == Field::Password {
            let confirm_ref = FieldRef::register(Field::ConfirmPassword);
            if let Some(confirm) = doc.field_value(confirm_ref) {
                if password.is_empty() || !confirm.is_empty() {
                    doc.set_field_status(confirm_ref, live_status(Field::ConfirmPassword, &confirm, &password));
                }
            }
        }
    }

    /// Guard the register form. On the first failing field the submission is
    /// cancelled, the field is flagged and focused, and the message is shown.
    pub fn on_submit<D: FormDom + ?Sized>(&self, panel: FormPanel, doc: &mut D) -> Propagation {
        if panel != FormPanel::Register {
            return Propagation::Continue;
        }
        let value = |doc: &D, field: Field| doc.field_value(FieldRef::register(field)).unwrap_or_default();
        let form = RegisterForm {
            username: value(&*doc, Field::Username),
            email: value(&*doc, Field::Email),
            phone: value(&*doc, Field::Phone),
            password: value(&*doc, Field::Password),
            confirm_password: value(&*doc, Field::ConfirmPassword),
        };

        for field in Field::REGISTER_ORDER {
            doc.set_field_status(FieldRef::register(field), FieldStatus::Valid);
        }

        match check_register(&form) {
            Ok(()) => Propagation::Continue,
            Err(err) => {
                let target = FieldRef::register(err.field);
                doc.set_field_status(target, FieldStatus::Invalid(err.message));
                doc.focus_field(target);
                doc.alert(err.message);
                log::debug!("auth: register blocked on {}", err.field.name());
                Propagation::PreventDefault
            }
        }
    }

    pub fn on_click<D: FormDom + ?Sized>(&mut self, target: &ClickTarget, doc: &mut D) -> Propagation {
        match target {
            ClickTarget::Label { for_attr } => match FormPanel::from_label_target(for_attr) {
                Some(panel) => {
                    self.show(panel, doc);
                    Propagation::PreventDefault
                }
                None => Propagation::Continue,
            },
            ClickTarget::Toggle(field) => {
                self.toggle_visibility(*field, doc);
                Propagation::Continue
            }
            ClickTarget::Element { .. } | ClickTarget::Other => Propagation::Continue,
        }
    }
}

impl<D: FormDom + ?Sized> Component<D> for AuthForms {
    fn id(&self) -> ComponentId {
        ComponentId::AuthForms
    }

    fn attach(&mut self, doc: &mut D, subs: &mut Subscriptions) {
        if !FormPanel::ALL.into_iter().any(|p| doc.has_panel(p)) {
            return;
        }
        self.show(self.panels.visible(), doc);
        self.install_toggles(doc);

        if doc.has_panel(FormPanel::Register) {
            subs.subscribe(ComponentId::AuthForms, EventKind::Input);
            subs.subscribe(ComponentId::AuthForms, EventKind::Submit);
        }
        subs.subscribe(ComponentId::AuthForms, EventKind::Click);
    }

    fn handle(&mut self, event: &UiEvent, doc: &mut D) -> Propagation {
        match event {
            UiEvent::Input(field) => {
                self.on_input(*field, doc);
                Propagation::Continue
            }
            UiEvent::Submit(panel) => self.on_submit(*panel, doc),
            UiEvent::Click(target) => self.on_click(target, doc),
            _ => Propagation::Continue,
        }
    }
}
