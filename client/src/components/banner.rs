//! Rotating promo banner on the home page.
//!
//! Cycles the header strip through a fixed list of messages on a timer and
//! lets the visitor step forward or back. Any manual step restarts the timer
//! so the new message gets a full interval.

#[cfg(test)]
#[path = "banner_test.rs"]
mod banner_test;

use leptos::prelude::*;

use crate::dom::{Scheduler, TextDom};
use crate::events::{ClickTarget, Component, ComponentId, EventKind, Propagation, Subscriptions, UiEvent};
use crate::state::banner::{BannerState, DEFAULT_INTERVAL_MS};

pub const DISPLAY_ID: &str = "dynamic-menu1-text";
pub const PREV_ID: &str = "prev-btn";
pub const NEXT_ID: &str = "next-btn";

#[derive(Debug)]
pub struct RotatingBanner {
    state: BannerState,
    interval_ms: u32,
    has_display: bool,
}

impl Default for RotatingBanner {
    fn default() -> Self {
        Self::new(BannerState::default(), DEFAULT_INTERVAL_MS)
    }
}

impl RotatingBanner {
    #[must_use]
    pub fn new(state: BannerState, interval_ms: u32) -> Self {
        Self { state, interval_ms, has_display: false }
    }

    #[must_use]
    pub fn state(&self) -> &BannerState {
        &self.state
    }

    fn render<D: TextDom + ?Sized>(&self, doc: &mut D) {
        if let Some(text) = self.state.current() {
            doc.set_text(DISPLAY_ID, text);
        }
    }

    fn restart_timer<D: Scheduler + ?Sized>(&mut self, doc: &mut D) {
        if let Some(old) = self.state.take_timer() {
            doc.clear_interval(old);
        }
        match doc.set_interval(self.interval_ms) {
            Some(id) => {
                self.state.replace_timer(id);
            }
            None => log::warn!("banner: could not start rotation timer"),
        }
    }

    /// Automatic rotation step.
    pub fn tick<D: TextDom + ?Sized>(&mut self, doc: &mut D) {
        self.state.advance();
        self.render(doc);
    }

    pub fn next<D: TextDom + Scheduler + ?Sized>(&mut self, doc: &mut D) {
        self.step(doc, BannerState::advance);
    }

    pub fn prev<D: TextDom + Scheduler + ?Sized>(&mut self, doc: &mut D) {
        self.step(doc, BannerState::retreat);
    }

    fn step<D: TextDom + Scheduler + ?Sized>(&mut self, doc: &mut D, move_index: fn(&mut BannerState)) {
        if self.state.is_empty() {
            return;
        }
        move_index(&mut self.state);
        self.render(doc);
        if self.has_display {
            self.restart_timer(doc);
        }
    }
}

impl<D: TextDom + Scheduler + ?Sized> Component<D> for RotatingBanner {
    fn id(&self) -> ComponentId {
        ComponentId::Banner
    }

    fn attach(&mut self, doc: &mut D, subs: &mut Subscriptions) {
        if self.state.is_empty() {
            return;
        }
        self.has_display = doc.has_element(DISPLAY_ID);
        if self.has_display {
            self.render(doc);
            self.restart_timer(doc);
            subs.subscribe(ComponentId::Banner, EventKind::Timer);
        }
        if doc.has_element(PREV_ID) || doc.has_element(NEXT_ID) {
            subs.subscribe(ComponentId::Banner, EventKind::Click);
        }
    }

    fn handle(&mut self, event: &UiEvent, doc: &mut D) -> Propagation {
        match event {
            UiEvent::TimerFired(id) if self.state.timer() == Some(*id) => self.tick(doc),
            UiEvent::Click(ClickTarget::Element { id }) if id == PREV_ID => self.prev(doc),
            UiEvent::Click(ClickTarget::Element { id }) if id == NEXT_ID => self.next(doc),
            _ => {}
        }
        Propagation::Continue
    }

    fn detach(&mut self, doc: &mut D, subs: &mut Subscriptions) {
        if let Some(id) = self.state.take_timer() {
            doc.clear_interval(id);
        }
        subs.unsubscribe_all(ComponentId::Banner);
    }
}

/// Server-rendered banner strip. The first message is rendered up front so
/// the strip is never blank before the script runs.
#[component]
pub fn BannerStrip(first: String) -> impl IntoView {
    view! {
        <div class="menu1">
            <button type="button" id=PREV_ID class="menu1-nav" aria-label="Trước">"‹"</button>
            <span id=DISPLAY_ID class="menu1-text">{first}</span>
            <button type="button" id=NEXT_ID class="menu1-nav" aria-label="Sau">"›"</button>
        </div>
    }
}
