//! Rotating banner position and timer handle.

#[cfg(test)]
#[path = "banner_test.rs"]
mod banner_test;

use crate::events::TimerId;

pub const DEFAULT_MESSAGES: [&str; 3] = ["xin chào", "hân hạnh đón tiếp", "một hai ba"];
pub const DEFAULT_INTERVAL_MS: u32 = 3000;

/// Index into a fixed message list plus the interval currently driving it.
///
/// An empty list is allowed; every movement is then a no-op and `current`
/// is `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerState {
    messages: Vec<String>,
    index: usize,
    timer: Option<TimerId>,
}

impl BannerState {
    #[must_use]
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { messages: messages.into_iter().map(Into::into).collect(), index: 0, timer: None }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.messages.get(self.index).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Step forward, wrapping to the first message.
    pub fn advance(&mut self) {
        if !self.messages.is_empty() {
            self.index = (self.index + 1) % self.messages.len();
        }
    }

    /// Step back, wrapping to the last message.
    pub fn retreat(&mut self) {
        if !self.messages.is_empty() {
            let len = self.messages.len();
            self.index = (self.index + len - 1) % len;
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    #[must_use]
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Record a new interval handle, returning the one it replaces so the
    /// caller can clear it.
    pub fn replace_timer(&mut self, timer: TimerId) -> Option<TimerId> {
        self.timer.replace(timer)
    }

    pub fn take_timer(&mut self) -> Option<TimerId> {
        self.timer.take()
    }
}

impl Default for BannerState {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGES)
    }
}
