use super::*;
use crate::dom::memory::MemoryDocument;
use crate::util::validate::{CONFIRM_MISMATCH, EMAIL_INVALID, PHONE_INVALID, USERNAME_REQUIRED};

fn attached(initial: FormPanel) -> (AuthForms, MemoryDocument, Subscriptions) {
    let mut forms = AuthForms::new(initial);
    let mut doc = MemoryDocument::auth_page();
    let mut subs = Subscriptions::new();
    forms.attach(&mut doc, &mut subs);
    (forms, doc, subs)
}

fn fill_register(doc: &mut MemoryDocument, values: [&str; 5]) {
    for (field, value) in Field::REGISTER_ORDER.into_iter().zip(values) {
        doc.set_value(FieldRef::register(field), value);
    }
}

fn label(target: &str) -> UiEvent {
    UiEvent::Click(ClickTarget::Label { for_attr: target.to_owned() })
}

// =============================================================
// Panels
// =============================================================

#[test]
fn attach_shows_only_the_initial_panel() {
    let (_, doc, _) = attached(FormPanel::Login);
    assert_eq!(doc.visible_panels(), vec![FormPanel::Login]);

    let (_, doc, _) = attached(FormPanel::Register);
    assert_eq!(doc.visible_panels(), vec![FormPanel::Register]);
}

#[test]
fn label_click_switches_panel_and_prevents_navigation() {
    let (mut forms, mut doc, _) = attached(FormPanel::Login);

    let outcome = forms.handle(&label("registerForm"), &mut doc);
    assert!(outcome.prevented());
    assert_eq!(doc.visible_panels(), vec![FormPanel::Register]);
    assert_eq!(forms.visible(), FormPanel::Register);

    forms.handle(&label("forgotForm"), &mut doc);
    assert_eq!(doc.visible_panels(), vec![FormPanel::ForgotPassword]);

    forms.handle(&label("loginForm"), &mut doc);
    assert_eq!(doc.visible_panels(), vec![FormPanel::Login]);
}

#[test]
fn unknown_label_targets_are_ignored() {
    let (mut forms, mut doc, _) = attached(FormPanel::Login);
    let outcome = forms.handle(&label("remember"), &mut doc);
    assert!(!outcome.prevented());
    assert_eq!(doc.visible_panels(), vec![FormPanel::Login]);
}

#[test]
fn exactly_one_panel_visible_after_any_click_sequence() {
    let (mut forms, mut doc, _) = attached(FormPanel::Login);
    for target in ["registerForm", "registerForm", "nope", "forgotForm", "loginForm", "forgotForm"] {
        forms.handle(&label(target), &mut doc);
        assert_eq!(doc.visible_panels().len(), 1, "after {target}");
    }
}

#[test]
fn attach_without_panels_registers_nothing() {
    let mut forms = AuthForms::default();
    let mut doc = MemoryDocument::home_page();
    let mut subs = Subscriptions::new();
    forms.attach(&mut doc, &mut subs);
    assert!(subs.is_empty());
}

// =============================================================
// Live validation
// =============================================================

#[test]
fn live_feedback_marks_invalid_then_valid() {
    let (mut forms, mut doc, _) = attached(FormPanel::Register);
    let email = FieldRef::register(Field::Email);

    doc.set_value(email, "an@");
    forms.handle(&UiEvent::Input(email), &mut doc);
    assert_eq!(doc.field(email).border, "red");
    assert_eq!(doc.field(email).message, EMAIL_INVALID);

    doc.set_value(email, "an@shop.vn");
    forms.handle(&UiEvent::Input(email), &mut doc);
    assert_eq!(doc.field(email).border, "");
    assert_eq!(doc.field(email).message, "");
}

#[test]
fn clearing_an_input_returns_it_to_neutral() {
    let (mut forms, mut doc, _) = attached(FormPanel::Register);
    let phone = FieldRef::register(Field::Phone);

    doc.set_value(phone, "12");
    forms.handle(&UiEvent::Input(phone), &mut doc);
    assert_eq!(doc.field(phone).message, PHONE_INVALID);

    doc.set_value(phone, "");
    forms.handle(&UiEvent::Input(phone), &mut doc);
    assert_eq!(doc.field(phone).border, "white");
    assert_eq!(doc.field(phone).message, "");
}

#[test]
fn password_change_rechecks_filled_confirmation() {
    let (mut forms, mut doc, _) = attached(FormPanel::Register);
    let password = FieldRef::register(Field::Password);
    let confirm = FieldRef::register(Field::ConfirmPassword);

    doc.set_value(password, "secret1");
    doc.set_value(confirm, "secret1");
    forms.handle(&UiEvent::Input(confirm), &mut doc);
    assert_eq!(doc.field(confirm).message, "");

    doc.set_value(password, "secret2");
    forms.handle(&UiEvent::Input(password), &mut doc);
    assert_eq!(doc.field(confirm).message, CONFIRM_MISMATCH);
    assert_eq!(doc.field(confirm).border, "red");
}

#[test]
fn password_change_leaves_empty_confirmation_alone() {
    let (mut forms, mut doc, _) = attached(FormPanel::Register);
    let password = FieldRef::register(Field::Password);
    let confirm = FieldRef::register(Field::ConfirmPassword);

    doc.set_value(password, "secret1");
    forms.handle(&UiEvent::Input(password), &mut doc);
    assert_eq!(doc.field(confirm).border, "");
    assert_eq!(doc.field(confirm).message, "");
}

#[test]
fn login_inputs_get_no_live_feedback() {
    let (mut forms, mut doc, _) = attached(FormPanel::Login);
    let username = FieldRef::login(Field::Username);
    doc.set_value(username, "an");
    forms.handle(&UiEvent::Input(username), &mut doc);
    assert_eq!(doc.field(username).border, "");
}

// =============================================================
// Submit guard
// =============================================================

#[test]
fn submit_with_empty_username_is_blocked() {
    let (mut forms, mut doc, _) = attached(FormPanel::Register);
    fill_register(&mut doc, ["", "an@shop.vn", "0912345678", "secret1", "secret1"]);

    let outcome = forms.handle(&UiEvent::Submit(FormPanel::Register), &mut doc);

    let username = FieldRef::register(Field::Username);
    assert!(outcome.prevented());
    assert_eq!(doc.alerts, vec![USERNAME_REQUIRED.to_owned()]);
    assert_eq!(doc.focused, Some(username));
    assert_eq!(doc.field(username).border, "red");
}

#[test]
fn submit_reports_only_the_first_failure() {
    let (mut forms, mut doc, _) = attached(FormPanel::Register);
    fill_register(&mut doc, ["an", "bad", "123", "x", "y"]);

    forms.handle(&UiEvent::Submit(FormPanel::Register), &mut doc);

    assert_eq!(doc.alerts, vec![EMAIL_INVALID.to_owned()]);
    assert_eq!(doc.focused, Some(FieldRef::register(Field::Email)));
    assert_eq!(doc.field(FieldRef::register(Field::Phone)).border, "");
}

#[test]
fn submit_resets_stale_feedback_before_checking() {
    let (mut forms, mut doc, _) = attached(FormPanel::Register);
    let phone = FieldRef::register(Field::Phone);
    doc.set_value(phone, "1");
    forms.handle(&UiEvent::Input(phone), &mut doc);
    assert_eq!(doc.field(phone).border, "red");

    fill_register(&mut doc, ["", "", "0912345678", "", ""]);
    forms.handle(&UiEvent::Submit(FormPanel::Register), &mut doc);
    assert_eq!(doc.field(phone).border, "");
}

#[test]
fn valid_register_submission_proceeds() {
    let (mut forms, mut doc, _) = attached(FormPanel::Register);
    fill_register(&mut doc, ["an", "an@shop.vn", "+84912345678", "secret1", "secret1"]);

    let outcome = forms.handle(&UiEvent::Submit(FormPanel::Register), &mut doc);
    assert!(!outcome.prevented());
    assert!(doc.alerts.is_empty());
    assert_eq!(doc.focused, None);
}

#[test]
fn login_submit_is_not_intercepted() {
    let (mut forms, mut doc, _) = attached(FormPanel::Login);
    let outcome = forms.handle(&UiEvent::Submit(FormPanel::Login), &mut doc);
    assert!(!outcome.prevented());
    assert!(doc.alerts.is_empty());
}

// =============================================================
// Visibility toggles
// =============================================================

#[test]
fn toggles_installed_on_register_and_login_passwords() {
    let (_, doc, _) = attached(FormPanel::Login);
    for field in [
        FieldRef::register(Field::Password),
        FieldRef::register(Field::ConfirmPassword),
        FieldRef::login(Field::Password),
    ] {
        assert_eq!(doc.field(field).toggles, vec![ICON_MASKED.to_owned()], "{field:?}");
    }
    assert!(doc.field(FieldRef::login(Field::Username)).toggles.is_empty());
}

#[test]
fn attaching_twice_adds_no_second_toggle() {
    let (mut forms, mut doc, mut subs) = attached(FormPanel::Login);
    forms.attach(&mut doc, &mut subs);
    assert_eq!(forms.install_toggles(&mut doc), 0);
    assert_eq!(doc.field(FieldRef::login(Field::Password)).toggles.len(), 1);
    assert_eq!(subs.len(), 3);
}

#[test]
fn toggle_flips_masking_and_icon() {
    let (mut forms, mut doc, _) = attached(FormPanel::Login);
    let field = FieldRef::login(Field::Password);
    let click = UiEvent::Click(ClickTarget::Toggle(field));

    forms.handle(&click, &mut doc);
    assert!(!doc.field(field).masked);
    assert_eq!(doc.field(field).toggles, vec![ICON_REVEALED.to_owned()]);

    forms.handle(&click, &mut doc);
    assert!(doc.field(field).masked);
    assert_eq!(doc.field(field).toggles, vec![ICON_MASKED.to_owned()]);
}
