//! Request-side modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the form payloads posted to the server, `no_cache` the
//! policy applied to outgoing requests, and `update_check` the freshness
//! probe decision logic. `request_hooks` wires the policy into the browser's
//! request functions.

pub mod no_cache;
#[cfg(feature = "hydrate")]
pub mod request_hooks;
pub mod types;
pub mod update_check;
