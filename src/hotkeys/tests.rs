use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn duplicate_within_window_is_dropped() {
    let mut debouncer = HotkeyDebouncer::default();
    let base = Instant::now();

    assert!(debouncer.accept(HotkeyAction::PlayPause, base));
    assert!(!debouncer.accept(HotkeyAction::PlayPause, base + Duration::from_millis(500)));
}

#[test]
fn spaced_triggers_both_forward() {
    let mut debouncer = HotkeyDebouncer::default();
    let base = Instant::now();

    assert!(debouncer.accept(HotkeyAction::PlayPause, base));
    assert!(debouncer.accept(HotkeyAction::PlayPause, base + Duration::from_millis(2100)));
}

#[test]
fn trigger_exactly_at_the_window_boundary_forwards() {
    let mut debouncer = HotkeyDebouncer::new(Duration::from_millis(2000));
    let base = Instant::now();

    assert!(debouncer.accept(HotkeyAction::Stop, base));
    assert!(debouncer.accept(HotkeyAction::Stop, base + Duration::from_millis(2000)));
}

#[test]
fn window_restarts_from_the_last_accepted_trigger() {
    let mut debouncer = HotkeyDebouncer::default();
    let base = Instant::now();

    assert!(debouncer.accept(HotkeyAction::Next, base));
    // Dropped triggers do not extend the window.
    assert!(!debouncer.accept(HotkeyAction::Next, base + Duration::from_millis(1900)));
    assert!(debouncer.accept(HotkeyAction::Next, base + Duration::from_millis(2050)));
}

#[test]
fn actions_debounce_independently() {
    let mut debouncer = HotkeyDebouncer::default();
    let base = Instant::now();

    assert!(debouncer.accept(HotkeyAction::PlayPause, base));
    assert!(debouncer.accept(HotkeyAction::Stop, base + Duration::from_millis(10)));
    assert!(debouncer.accept(HotkeyAction::Previous, base + Duration::from_millis(20)));
    assert!(debouncer.accept(HotkeyAction::Next, base + Duration::from_millis(30)));
}

#[test]
fn action_for_key_covers_the_four_media_keys() {
    assert_eq!(action_for_key(KEY_PLAYPAUSE), Some(HotkeyAction::PlayPause));
    assert_eq!(action_for_key(KEY_STOPCD), Some(HotkeyAction::Stop));
    assert_eq!(
        action_for_key(KEY_PREVIOUSSONG),
        Some(HotkeyAction::Previous)
    );
    assert_eq!(action_for_key(KEY_NEXTSONG), Some(HotkeyAction::Next));
    assert_eq!(action_for_key(30), None);
}

#[test]
fn hook_guard_detaches_once_on_drop() {
    let detached = Arc::new(AtomicUsize::new(0));

    let guard = {
        let detached = detached.clone();
        HookGuard::new(move || {
            detached.fetch_add(1, Ordering::SeqCst);
        })
    };
    assert_eq!(detached.load(Ordering::SeqCst), 0);

    drop(guard);
    assert_eq!(detached.load(Ordering::SeqCst), 1);
}

#[test]
fn noop_guard_drops_quietly() {
    drop(HookGuard::noop());
}
