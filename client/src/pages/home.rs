//! Storefront home page.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::app::{PageMeta, SiteContext, render_document};
use crate::components::banner::BannerStrip;
use crate::components::header::{SiteHeader, nav_sections};
use crate::state::banner::DEFAULT_MESSAGES;

pub const META: PageMeta = PageMeta {
    title: "Trang Chủ",
    stylesheets: &["/data/css/index.css", "/data/css/menu1.css", "/data/css/menu2.css"],
    initial_panel: None,
};

#[must_use]
pub fn render(site: &SiteContext) -> String {
    let cart_count = site.cart_count;
    render_document(site, &META, move || {
        let sections = nav_sections()
            .map(|(id, heading)| {
                view! {
                    <section id=id class="home-section">
                        <h2>{heading}</h2>
                    </section>
                }
            })
            .collect_view();
        view! {
            <BannerStrip first=DEFAULT_MESSAGES[0].to_owned()/>
            <SiteHeader cart_count=cart_count/>
            <main class="home">{sections}</main>
        }
    })
}
