//! Site header: brand, search, account and cart links, secondary navigation.

use leptos::prelude::*;

pub const BRAND: &str = "Divine Shop";

struct NavItem {
    href: &'static str,
    icon: &'static str,
    alt: &'static str,
    label: &'static str,
}

static NAV_ITEMS: [NavItem; 4] = [
    NavItem { href: "#recently-viewed", icon: "/data/svg/view.svg", alt: "", label: "Sản phẩm bán vừa xem" },
    NavItem { href: "#best-sellers", icon: "/data/svg/buy.svg", alt: "", label: "Sản phẩm mua nhiều" },
    NavItem { href: "#promotions", icon: "/data/svg/sale.svg", alt: "", label: "Sản phẩm khuyến mãi" },
    NavItem { href: "#payment-methods", icon: "/data/svg/payment.svg", alt: "Payment", label: "Hình thức thanh toán" },
];

/// Home-page section ids targeted by the secondary navigation.
#[must_use]
pub fn nav_sections() -> impl Iterator<Item = (&'static str, &'static str)> {
    NAV_ITEMS.iter().map(|item| (item.href.trim_start_matches('#'), item.label))
}

#[component]
pub fn SiteHeader(cart_count: u32) -> impl IntoView {
    let nav = NAV_ITEMS
        .iter()
        .map(|item| {
            view! {
                <a href=item.href class="nav-item">
                    <img src=item.icon alt=item.alt/>
                    <span>{item.label}</span>
                </a>
            }
        })
        .collect_view();

    view! {
        <div class="main-header">
            <div class="header-top">
                <div class="header-container">
                    <a href="/" class="logo-section">
                        <img src="/data/svg/logo.svg" alt=BRAND class="logo"/>
                        <span class="brand-name">{BRAND}</span>
                    </a>
                    <div class="search-section">
                        <form class="search-form">
                            <input type="text" class="search-input" placeholder="Tìm kiếm sản phẩm" maxlength="60"/>
                            <button type="submit" class="search-btn">
                                <img src="/data/svg/search.svg" alt="Tìm kiếm"/>
                            </button>
                        </form>
                    </div>
                    <div class="user-actions">
                        <a href="/login" class="auth-section login-redirect">
                            <img class="avatar-user" src="/data/svg/user.svg" alt="User"/>
                            <span>"Đăng nhập / Đăng ký"</span>
                        </a>
                        <a href="/cart" class="cart-section">
                            <img src="/data/svg/cart.svg" alt="Giỏ hàng"/>
                            <span>"Giỏ hàng"</span>
                            <span class="cart-count">{cart_count}</span>
                        </a>
                    </div>
                </div>
            </div>
            <div class="secondary-nav">
                <div class="nav-container">{nav}</div>
            </div>
        </div>
    }
}
