//! Bare error document used when a page cannot be produced.

use leptos::prelude::*;

use crate::app::{PageMeta, SiteContext, render_document};

pub const META: PageMeta = PageMeta { title: "Lỗi", stylesheets: &["/data/css/menu2.css"], initial_panel: None };

#[must_use]
pub fn render(message: &str) -> String {
    let message = message.to_owned();
    render_document(&SiteContext::default(), &META, move || {
        view! {
            <main class="error-page">
                <p class="error-message" role="alert">{message}</p>
            </main>
        }
    })
}
