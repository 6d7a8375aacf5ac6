//! Periodic "has the page changed?" probe.
//!
//! DESIGN
//! ======
//! The watcher never performs I/O. On each tick the owning component asks
//! the document to send one HEAD request for the current page; the document
//! later reports the outcome as `UiEvent::UpdateChecked`, which lands in
//! `observe`. The first `Last-Modified` seen becomes the baseline and a later
//! different value asks for a reload.
//!
//! TRADE-OFFS
//! ==========
//! There is no cancellation: a slow response from an earlier tick may still
//! arrive after a newer one and is compared like any other. Failed probes are
//! logged and the next tick simply tries again.

#[cfg(test)]
#[path = "update_check_test.rs"]
mod update_check_test;

pub const DEFAULT_UPDATE_CHECK_MS: u32 = 30_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateDecision {
    Stay,
    Reload,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateWatcher {
    baseline: Option<String>,
    failures: u32,
}

impl UpdateWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn baseline(&self) -> Option<&str> {
        self.baseline.as_deref()
    }

    /// Failed probes since the last successful one.
    #[must_use]
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn observe(&mut self, outcome: &Result<Option<String>, String>) -> UpdateDecision {
        match outcome {
            Err(reason) => {
                self.failures += 1;
                log::warn!("update check failed ({} in a row): {reason}", self.failures);
                UpdateDecision::Stay
            }
            Ok(None) => {
                self.failures = 0;
                UpdateDecision::Stay
            }
            Ok(Some(last_modified)) => {
                self.failures = 0;
                match &self.baseline {
                    None => {
                        self.baseline = Some(last_modified.clone());
                        UpdateDecision::Stay
                    }
                    Some(seen) if seen == last_modified => UpdateDecision::Stay,
                    Some(_) => {
                        log::info!("page changed on the server, reloading");
                        self.baseline = Some(last_modified.clone());
                        UpdateDecision::Reload
                    }
                }
            }
        }
    }
}
