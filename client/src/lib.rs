//! Divine Shop client: page markup rendered by the server plus the browser
//! runtime that drives the auth forms, the promo banner and cache busting.
//!
//! ARCHITECTURE
//! ============
//! - `app`, `pages`, `components::header`: Leptos templates rendered to
//!   strings on the server (`ssr`).
//! - `events`, `state`, `components`, `runtime`: DOM-independent behavior,
//!   unit tested against an in-memory document.
//! - `dom::browser`: the `web-sys` binding and wasm entry point (`hydrate`).

pub mod app;
pub mod components;
pub mod dom;
pub mod events;
pub mod net;
pub mod pages;
pub mod runtime;
pub mod state;
pub mod util;
