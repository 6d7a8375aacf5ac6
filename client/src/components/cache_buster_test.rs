use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::dom::memory::MemoryDocument;
use crate::net::no_cache::FetchRequest;

const TOKEN: CacheBustToken = CacheBustToken(1_700_000_000_000);

/// Records the policy it was handed and the requests it prepared.
#[derive(Clone, Default)]
struct RecordingHooks {
    log: Rc<RefCell<Vec<String>>>,
    policy: Rc<RefCell<Option<NoCachePolicy>>>,
}

impl RequestHooks for RecordingHooks {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn install(&mut self, policy: NoCachePolicy) {
        self.log.borrow_mut().push("install".into());
        *self.policy.borrow_mut() = Some(policy);
    }

    fn uninstall(&mut self) {
        self.log.borrow_mut().push("uninstall".into());
        self.policy.borrow_mut().take();
    }
}

fn attached(config: CacheBusterConfig) -> (CacheBuster, MemoryDocument, Subscriptions) {
    let mut buster = CacheBuster::new(TOKEN, config);
    let mut doc = MemoryDocument::home_page();
    let mut subs = Subscriptions::new();
    buster.attach(&mut doc, &mut subs);
    (buster, doc, subs)
}

#[test]
fn attach_writes_no_cache_meta_tags() {
    let (_, doc, _) = attached(CacheBusterConfig::default());
    let names: Vec<&str> = doc.meta.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Cache-Control", "Pragma", "Expires"]);
    assert_eq!(doc.meta[2].1, "0");
}

#[test]
fn stylesheets_get_token_and_lose_old_query() {
    let (_, doc, _) = attached(CacheBusterConfig::default());
    assert_eq!(doc.stylesheets[0], "/data/css/index.css?v=1700000000000");
    assert_eq!(doc.stylesheets[1], "/data/css/menu1.css?v=1700000000000");
}

#[test]
fn main_entry_script_is_left_alone() {
    let (_, doc, _) = attached(CacheBusterConfig::default());
    assert_eq!(doc.scripts[0], "/data/js/menu.js?v=1700000000000");
    assert_eq!(doc.scripts[1], "/pkg/divine_client.js");
}

#[test]
fn reload_navigation_skips_asset_rewrite() {
    let mut buster = CacheBuster::new(TOKEN, CacheBusterConfig::default());
    let mut doc = MemoryDocument::home_page();
    doc.navigation = NavigationKind::Reload;
    let before = doc.stylesheets.clone();

    buster.attach(&mut doc, &mut Subscriptions::new());

    assert_eq!(doc.stylesheets, before);
    assert_eq!(doc.meta.len(), 3);
}

#[test]
fn assets_are_rewritten_once() {
    let (mut buster, mut doc, _) = attached(CacheBusterConfig::default());
    assert_eq!(buster.rewrite_assets(&mut doc), 0);
    assert_eq!(doc.stylesheets[0], "/data/css/index.css?v=1700000000000");
}

#[test]
fn hooks_receive_the_page_policy_once() {
    let hooks = RecordingHooks::default();
    let mut buster =
        CacheBuster::new(TOKEN, CacheBusterConfig::default()).with_hooks([Box::new(hooks.clone()) as Box<dyn RequestHooks>]);
    let mut doc = MemoryDocument::home_page();
    let mut subs = Subscriptions::new();

    buster.attach(&mut doc, &mut subs);
    buster.attach(&mut doc, &mut subs);

    assert_eq!(*hooks.log.borrow(), vec!["install".to_owned()]);
    let policy = hooks.policy.borrow().expect("policy installed");
    let prepared = policy.prepare(FetchRequest::new("/api/items?page=2"));
    assert_eq!(prepared.url, "/api/items?page=2&_=1700000000000");

    buster.detach(&mut doc, &mut subs);
    assert_eq!(*hooks.log.borrow(), vec!["install".to_owned(), "uninstall".to_owned()]);
}

#[test]
fn ctrl_shift_r_forces_bypass_reload() {
    let (mut buster, mut doc, _) = attached(CacheBusterConfig::default());

    let outcome = buster.handle(&UiEvent::KeyDown(KeyChord::ctrl_shift("R")), &mut doc);
    assert!(outcome.prevented());
    assert_eq!(doc.reloads, vec![true]);
}

#[test]
fn other_chords_are_ignored() {
    let (mut buster, mut doc, _) = attached(CacheBusterConfig::default());
    let plain_r = KeyChord { ctrl: true, shift: false, alt: false, key: "r".into() };
    let with_alt = KeyChord { alt: true, ..KeyChord::ctrl_shift("R") };

    for chord in [plain_r, with_alt, KeyChord::ctrl_shift("T")] {
        assert!(!buster.handle(&UiEvent::KeyDown(chord), &mut doc).prevented());
    }
    assert!(doc.reloads.is_empty());
}

#[test]
fn update_check_disabled_by_default() {
    let (_, doc, subs) = attached(CacheBusterConfig::default());
    assert!(doc.active_timers.is_empty());
    assert!(!subs.is_subscribed(ComponentId::CacheBuster, EventKind::Timer));
}

#[test]
fn update_check_probes_and_reloads_on_change() {
    let config = CacheBusterConfig { update_check_ms: Some(5_000), ..CacheBusterConfig::default() };
    let (mut buster, mut doc, _) = attached(config);
    assert_eq!(doc.active_timers.len(), 1);
    let timer = doc.active_timers[0].0;

    buster.handle(&UiEvent::TimerFired(timer), &mut doc);
    assert_eq!(doc.probes, 1);

    let stamp = |s: &str| UiEvent::UpdateChecked(Ok(Some(s.to_owned())));
    buster.handle(&stamp("Mon, 19 Oct 2026 10:00:00 GMT"), &mut doc);
    buster.handle(&stamp("Mon, 19 Oct 2026 10:00:00 GMT"), &mut doc);
    assert!(doc.reloads.is_empty());

    buster.handle(&UiEvent::UpdateChecked(Err("network down".into())), &mut doc);
    assert!(doc.reloads.is_empty());
    assert_eq!(buster.watcher().failures(), 1);

    buster.handle(&stamp("Mon, 19 Oct 2026 11:00:00 GMT"), &mut doc);
    assert_eq!(doc.reloads, vec![true]);
}

#[test]
fn detach_stops_update_timer() {
    let config = CacheBusterConfig { update_check_ms: Some(5_000), ..CacheBusterConfig::default() };
    let (mut buster, mut doc, mut subs) = attached(config);
    buster.detach(&mut doc, &mut subs);
    assert!(doc.active_timers.is_empty());
    assert!(subs.is_empty());
}
