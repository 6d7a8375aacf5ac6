//! Document shell shared by every server-rendered page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders whole documents to strings with `render_document`.
//! The browser binding reads its startup parameters back from the `<body>`
//! data attributes written here and is loaded by the bootstrap module at the
//! end of the body.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;

use crate::state::forms::FormPanel;

/// Body attribute naming the auth panel to show first.
pub const INITIAL_PANEL_ATTR: &str = "data-initial-panel";
/// Body attribute carrying the update-check period in seconds.
pub const UPDATE_CHECK_ATTR: &str = "data-update-check-secs";

/// Loads the wasm bundle; its start function boots the page runtime.
pub const BOOT_SCRIPT: &str = r#"import init from "/pkg/divine_client.js"; init();"#;

pub const FAVICON: &str = "/data/svg/logo.svg";

/// Values every page needs, supplied by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteContext {
    pub cart_count: u32,
    pub update_check_secs: Option<u64>,
}

/// Per-page head contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageMeta {
    pub title: &'static str,
    pub stylesheets: &'static [&'static str],
    pub initial_panel: Option<FormPanel>,
}

/// Render a full HTML document around `body`.
pub fn render_document<F, V>(site: &SiteContext, meta: &PageMeta, body: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView + 'static,
{
    let title = meta.title;
    let stylesheets = meta.stylesheets;
    let initial_panel = meta.initial_panel.map(FormPanel::slug);
    let update_check = site.update_check_secs.filter(|secs| *secs > 0).map(|secs| secs.to_string());

    let owner = Owner::new();
    let html = owner.with(|| {
        let body = body();
        view! {
            <!DOCTYPE html>
            <html lang="vi">
                <head>
                    <meta charset="UTF-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
                    <meta http-equiv="Cache-Control" content="no-cache, no-store, must-revalidate"/>
                    <meta http-equiv="Pragma" content="no-cache"/>
                    <meta http-equiv="Expires" content="0"/>
                    <title>{title}</title>
                    <link rel="icon" href=FAVICON type="image/svg+xml"/>
                    {stylesheets.iter().map(|href| view! { <link rel="stylesheet" href=*href/> }).collect_view()}
                </head>
                <body data-initial-panel=initial_panel data-update-check-secs=update_check>
                    {body}
                    <script type="module" inner_html=BOOT_SCRIPT></script>
                </body>
            </html>
        }
        .to_html()
    });
    log::trace!("rendered '{title}' ({} bytes)", html.len());
    html
}
