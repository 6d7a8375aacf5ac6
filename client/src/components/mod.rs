//! Page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth_forms`, `banner` and `cache_buster` are the behavior components the
//! page runtime attaches in the browser. `header` and `banner::BannerStrip`
//! are server-rendered markup shared by the pages.

pub mod auth_forms;
pub mod banner;
pub mod cache_buster;
pub mod header;
