//! Server-rendered pages.
//!
//! ARCHITECTURE
//! ============
//! Each page is a `render` function returning a complete document string.
//! Markup shared between pages lives in `components`.

pub mod auth;
pub mod error;
pub mod home;
