//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure functions with no document access, reused by the components, the
//! browser binding and the server.

pub mod cache_bust;
pub mod validate;
