//! Wires a player host, the MPRIS overlay and the media-key hook into a
//! running bridge.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::bridge::TransportBridge;
use crate::config::Settings;
use crate::host::{HostNotification, PlayerHost};
use crate::hotkeys::{HookGuard, HotkeyDebouncer, HotkeyHook, action_for_key};
use crate::mpris::{self, OverlayError};
use crate::overlay::{MediaOverlay, OverlayRequest};

mod settings;

pub use settings::load_settings;

/// Drive the bridge until the host delivers [`HostNotification::Shutdown`]
/// (or hangs up the notification channel).
pub fn run<H: PlayerHost>(
    host: H,
    notifications: Receiver<HostNotification>,
    hook: &dyn HotkeyHook,
) -> Result<(), OverlayError> {
    let settings = load_settings();

    let (request_tx, request_rx) = mpsc::channel();
    let overlay = mpris::spawn(&settings.overlay.identity, request_tx)?;

    tracing::info!(identity = %settings.overlay.identity, "media overlay bridge running");
    event_loop(host, overlay, &settings, notifications, request_rx, hook);
    Ok(())
}

/// Pump all three event sources into the bridge.
///
/// Overlay requests and raw key events are drained between host
/// notifications. The hook guard acquired at startup is released on every
/// exit path, the shutdown notification included.
fn event_loop<H: PlayerHost, O: MediaOverlay>(
    host: H,
    overlay: O,
    settings: &Settings,
    notifications: Receiver<HostNotification>,
    requests: Receiver<OverlayRequest>,
    hook: &dyn HotkeyHook,
) {
    let mut bridge =
        TransportBridge::with_volume_step(host, overlay, settings.controls.volume_step);
    let mut debouncer = HotkeyDebouncer::new(Duration::from_millis(settings.hotkeys.debounce_ms));

    let (key_tx, key_rx) = mpsc::channel();
    let mut hook_guard: Option<HookGuard> = None;

    loop {
        while let Ok(request) = requests.try_recv() {
            bridge.on_request(request);
        }

        while let Ok(code) = key_rx.try_recv() {
            let Some(action) = action_for_key(code) else {
                continue;
            };
            if debouncer.accept(action, Instant::now()) {
                bridge.on_hotkey(action);
            }
        }

        match notifications.recv_timeout(Duration::from_millis(50)) {
            Ok(HostNotification::Startup) => {
                if settings.hotkeys.enabled && hook_guard.is_none() {
                    hook_guard = Some(hook.attach(key_tx.clone()));
                    tracing::debug!("media-key hook attached");
                }
                bridge.on_notification(HostNotification::Startup);
            }
            Ok(HostNotification::Shutdown) => {
                bridge.on_notification(HostNotification::Shutdown);
                drop(hook_guard.take());
                break;
            }
            Ok(notification) => bridge.on_notification(notification),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
