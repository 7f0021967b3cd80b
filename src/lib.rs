//! Event bridge between a music player host and the OS media overlay.
//!
//! The host drives the bridge with [`HostNotification`]s; the overlay's
//! requests come back in as [`OverlayRequest`]s; hardware media keys arrive
//! through a global hook and are debounced before forwarding. Everything in
//! between is translation: nothing here plays audio, decodes artwork or
//! draws UI.
//!
//! [`runtime::run`] wires a [`PlayerHost`] implementation to the MPRIS
//! backend in [`mpris`] and pumps all three event sources until the host
//! shuts the plugin down.

mod artwork;
mod bridge;
pub mod config;
mod host;
mod hotkeys;
pub mod mpris;
mod overlay;
pub mod runtime;

pub use artwork::{ArtworkStore, ArtworkToken};
pub use bridge::{DEFAULT_VOLUME_STEP, TransportBridge};
pub use host::{HostNotification, PlayState, PlayerHost, RepeatMode, TagField};
pub use hotkeys::{
    DEFAULT_DEBOUNCE, HookGuard, HotkeyAction, HotkeyDebouncer, HotkeyHook, action_for_key,
};
pub use overlay::{
    ButtonCapabilities, MediaOverlay, OverlayButton, OverlayRepeat, OverlayRequest, OverlayStatus,
    TrackDisplay,
};
