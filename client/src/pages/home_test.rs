use super::*;

#[test]
fn home_renders_banner_header_and_sections() {
    let html = render(&SiteContext::default());
    assert!(html.contains(r#"id="dynamic-menu1-text""#));
    assert!(html.contains("Divine Shop"));
    assert!(html.contains(r#"<span class="cart-count">0</span>"#));
    for id in ["recently-viewed", "best-sellers", "promotions", "payment-methods"] {
        assert!(html.contains(&format!(r#"id="{id}""#)), "missing section {id}");
        assert!(html.contains(&format!(r##"href="#{id}""##)), "missing nav link {id}");
    }
}

#[test]
fn home_links_its_stylesheets_and_no_auth_panels() {
    let html = render(&SiteContext::default());
    for sheet in META.stylesheets {
        assert!(html.contains(&format!(r#"href="{sheet}""#)), "missing {sheet}");
    }
    assert!(!html.contains("loginFormContent"));
    assert!(!html.contains("data-initial-panel"));
}

#[test]
fn cart_count_comes_from_site_context() {
    let html = render(&SiteContext { cart_count: 3, update_check_secs: None });
    assert!(html.contains(r#"<span class="cart-count">3</span>"#));
}
