//! Hardware media keys: the global-hook boundary and duplicate
//! suppression.
//!
//! Physical media keys are prone to double-firing; every action keeps its
//! own last-trigger timestamp and repeats inside the window are dropped.

use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

/// Linux input-event codes for the four media keys the bridge handles.
pub const KEY_NEXTSONG: u16 = 163;
pub const KEY_PLAYPAUSE: u16 = 164;
pub const KEY_PREVIOUSSONG: u16 = 165;
pub const KEY_STOPCD: u16 = 166;

/// Window within which a repeated key press counts as hardware
/// double-firing.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Media-key actions the bridge forwards to the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    PlayPause,
    Stop,
    Previous,
    Next,
}

/// Map a raw key code to a media-key action. Everything else is ignored.
pub fn action_for_key(code: u16) -> Option<HotkeyAction> {
    match code {
        KEY_PLAYPAUSE => Some(HotkeyAction::PlayPause),
        KEY_STOPCD => Some(HotkeyAction::Stop),
        KEY_PREVIOUSSONG => Some(HotkeyAction::Previous),
        KEY_NEXTSONG => Some(HotkeyAction::Next),
        _ => None,
    }
}

/// Suppresses duplicate media-key triggers, one timestamp per action.
///
/// Actions never affect each other; a `Next` press does not reset the
/// `PlayPause` window.
#[derive(Debug)]
pub struct HotkeyDebouncer {
    window: Duration,
    last: HashMap<HotkeyAction, Instant>,
}

impl HotkeyDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: HashMap::new(),
        }
    }

    /// Record `action` at `now` and report whether it should be forwarded.
    ///
    /// The first trigger of an action always passes; later ones pass only
    /// once the window has elapsed since the last accepted trigger.
    pub fn accept(&mut self, action: HotkeyAction, now: Instant) -> bool {
        match self.last.get(&action) {
            Some(&prev) if now.duration_since(prev) < self.window => {
                tracing::debug!(?action, "dropping duplicate media-key trigger");
                false
            }
            _ => {
                self.last.insert(action, now);
                true
            }
        }
    }
}

impl Default for HotkeyDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Detaches the global hook when dropped.
///
/// Acquired when the host starts the plugin and released on shutdown; drop
/// semantics make the release hold on early-exit paths too.
pub struct HookGuard {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl HookGuard {
    /// Wrap a detach callback to run once, on drop.
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A guard with nothing to release.
    pub fn noop() -> Self {
        Self { detach: None }
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for HookGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookGuard")
            .field("armed", &self.detach.is_some())
            .finish()
    }
}

/// OS-wide key-press source.
///
/// Owned by the platform layer; the bridge only attaches for the plugin's
/// lifetime and filters the stream with [`action_for_key`].
pub trait HotkeyHook {
    /// Start delivering raw key codes to `keys` until the returned guard
    /// is dropped.
    fn attach(&self, keys: Sender<u16>) -> HookGuard;
}

#[cfg(test)]
mod tests;
