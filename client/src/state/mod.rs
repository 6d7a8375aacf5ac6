//! Transient page state owned by the runtime components.
//!
//! DESIGN
//! ======
//! Plain data with named transitions. Nothing here touches the document;
//! components read these values and push the result through the `dom` ports.

pub mod banner;
pub mod forms;
