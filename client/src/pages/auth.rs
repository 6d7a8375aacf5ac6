//! Login / register / forgot-password page.
//!
//! DESIGN
//! ======
//! All three panels are always rendered; only the one named by
//! `AuthView::initial_panel` starts visible. The browser runtime takes over
//! switching from there. A server-side result (rejected or accepted
//! submission) is rendered as a notice inside the panel it belongs to.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::app::{PageMeta, SiteContext, render_document};
use crate::components::header::SiteHeader;
use crate::state::forms::FormPanel;
use crate::util::validate::Field;

pub const META_TITLE: &str = "Đăng nhập/Đăng ký";
const STYLESHEETS: &[&str] = &["/data/css/menu2.css", "/data/css/login.css"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Error,
    Info,
}

impl NoticeTone {
    fn class(self) -> &'static str {
        match self {
            Self::Error => "form-notice form-notice--error",
            Self::Info => "form-notice form-notice--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub panel: FormPanel,
    pub tone: NoticeTone,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthView {
    pub initial_panel: FormPanel,
    pub notice: Option<Notice>,
}

impl AuthView {
    #[must_use]
    pub fn panel(initial_panel: FormPanel) -> Self {
        Self { initial_panel, notice: None }
    }

    /// Re-render after a rejected submission: its panel is shown with the error.
    #[must_use]
    pub fn rejected(panel: FormPanel, message: impl Into<String>) -> Self {
        Self { initial_panel: panel, notice: Some(Notice { panel, tone: NoticeTone::Error, message: message.into() }) }
    }

    #[must_use]
    pub fn info(panel: FormPanel, message: impl Into<String>) -> Self {
        Self { initial_panel: panel, notice: Some(Notice { panel, tone: NoticeTone::Info, message: message.into() }) }
    }

    fn style(&self, panel: FormPanel) -> &'static str {
        if self.initial_panel == panel { "display: block" } else { "display: none" }
    }

    fn notice_for(&self, panel: FormPanel) -> Option<impl IntoView + use<>> {
        self.notice.as_ref().filter(|n| n.panel == panel).map(|n| {
            let class = n.tone.class();
            let message = n.message.clone();
            view! { <p class=class role="alert">{message}</p> }
        })
    }
}

/// Form `action` for each panel.
#[must_use]
pub fn submit_path(panel: FormPanel) -> &'static str {
    match panel {
        FormPanel::Login => "/auth/login",
        FormPanel::Register => "/auth/register",
        FormPanel::ForgotPassword => "/auth/forgot",
    }
}

fn input_box(field: Field, input_type: &'static str, label: &'static str) -> impl IntoView {
    let class = if field == Field::ConfirmPassword { "input-box confirm-password" } else { "input-box" };
    view! {
        <div class=class>
            <input type=input_type name=field.name() required=true autocomplete="off" placeholder=" "/>
            <label class="floating-label">{label}</label>
        </div>
    }
}

#[must_use]
pub fn render(site: &SiteContext, auth: &AuthView) -> String {
    let meta = PageMeta { title: META_TITLE, stylesheets: STYLESHEETS, initial_panel: Some(auth.initial_panel) };
    let cart_count = site.cart_count;
    let auth = auth.clone();

    render_document(site, &meta, move || {
        let login = FormPanel::Login;
        let register = FormPanel::Register;
        let forgot = FormPanel::ForgotPassword;
        view! {
            <SiteHeader cart_count=cart_count/>
            <main>
                <div class="wrapper" id=login.element_id() style=auth.style(login)>
                    <form action=submit_path(login) method="post">
                        <h1>"Đăng nhập"</h1>
                        {auth.notice_for(login)}
                        {input_box(Field::Username, "text", "Tên đăng nhập")}
                        {input_box(Field::Password, "password", "Mật khẩu")}
                        <div class="checkbox1">
                            <label for=forgot.label_target()>"Quên mật khẩu?"</label>
                        </div>
                        <button type="submit" class="btn">"Đăng nhập"</button>
                        <div class="link">
                            <p>"Bạn chưa có tài khoản? "<label for=register.label_target()>"Đăng ký"</label></p>
                        </div>
                    </form>
                </div>
                <div class="wrapper" id=register.element_id() style=auth.style(register)>
                    <form action=submit_path(register) method="post">
                        <h1>"Đăng ký"</h1>
                        {auth.notice_for(register)}
                        {input_box(Field::Username, "text", "Tên đăng nhập")}
                        {input_box(Field::Email, "email", "Email")}
                        {input_box(Field::Phone, "tel", "Số điện thoại")}
                        {input_box(Field::Password, "password", "Mật khẩu")}
                        {input_box(Field::ConfirmPassword, "password", "Xác nhận mật khẩu")}
                        <div class="checkbox1">
                            <label><input type="checkbox" required=true/>"Tôi đồng ý với điều khoản"</label>
                        </div>
                        <button type="submit" class="btn">"Đăng ký"</button>
                        <div class="link">
                            <p>"Đã có tài khoản? "<label for=login.label_target()>"Đăng nhập"</label></p>
                        </div>
                    </form>
                </div>
                <div class="wrapper" id=forgot.element_id() style=auth.style(forgot)>
                    <form action=submit_path(forgot) method="post">
                        <h1>"Khôi phục mật khẩu"</h1>
                        {auth.notice_for(forgot)}
                        {input_box(Field::Email, "email", "Email")}
                        <button type="submit" class="btn">"Gửi yêu cầu"</button>
                        <div class="link">
                            <p>"Bạn chưa có tài khoản? "<label for=register.label_target()>"Đăng ký"</label></p>
                        </div>
                    </form>
                </div>
            </main>
        }
    })
}
