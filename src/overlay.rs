//! Typed surface of the OS media-transport overlay.
//!
//! The overlay API delivers loosely-typed request events; this module pins
//! them down to one closed variant per request kind so the bridge can
//! match exhaustively.

use std::sync::Arc;

use crate::host::PlayState;

/// Overlay-side playback status.
///
/// A pure projection of the host's [`PlayState`]; the overlay never
/// transitions on its own.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverlayStatus {
    Stopped,
    Playing,
    Paused,
}

impl Default for OverlayStatus {
    fn default() -> Self {
        Self::Stopped
    }
}

impl From<PlayState> for OverlayStatus {
    fn from(state: PlayState) -> Self {
        match state {
            PlayState::Stopped => Self::Stopped,
            PlayState::Playing => Self::Playing,
            PlayState::Paused => Self::Paused,
        }
    }
}

/// Transport buttons the overlay can raise.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverlayButton {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    /// Unsupported; the bridge ignores it.
    Rewind,
    /// Unsupported; the bridge ignores it.
    FastForward,
    /// Volume up by one step.
    ChannelUp,
    /// Volume down by one step.
    ChannelDown,
}

/// Repeat mode as the overlay phrases it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverlayRepeat {
    None,
    Track,
    List,
}

impl Default for OverlayRepeat {
    fn default() -> Self {
        Self::None
    }
}

/// A request raised by the overlay, one variant per request kind.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayRequest {
    Button(OverlayButton),
    /// Absolute seek, milliseconds.
    Seek { position_ms: u64 },
    /// Playback-rate change; accepted but not forwarded anywhere.
    Rate { rate: f64 },
    Shuffle { enabled: bool },
    Repeat(OverlayRepeat),
}

/// Which overlay buttons are lit up.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ButtonCapabilities {
    pub play: bool,
    pub pause: bool,
    pub stop: bool,
    pub next: bool,
    pub previous: bool,
    pub rewind: bool,
    pub fast_forward: bool,
}

impl ButtonCapabilities {
    /// The transport set the bridge supports: everything except
    /// rewind/fast-forward.
    pub fn transport() -> Self {
        Self {
            play: true,
            pause: true,
            stop: true,
            next: true,
            previous: true,
            rewind: false,
            fast_forward: false,
        }
    }
}

/// Now-playing fields shown by the overlay.
///
/// Numeric fields stay `None` when the track does not carry a usable tag;
/// the overlay shows nothing for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackDisplay {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub track_number: Option<u32>,
    pub track_count: Option<u32>,
}

/// Outbound half of the overlay.
///
/// Implementations stage `set_*` values and must not show a new track
/// until [`publish`](MediaOverlay::publish) commits it; the bridge relies
/// on that ordering when it refreshes the display.
pub trait MediaOverlay {
    fn set_enabled(&mut self, enabled: bool);
    fn set_capabilities(&mut self, caps: ButtonCapabilities);
    fn set_status(&mut self, status: OverlayStatus);
    /// Replace the thumbnail reference, or clear it with `None`.
    fn set_thumbnail(&mut self, artwork: Option<Arc<[u8]>>);
    /// Commit the staged display fields.
    fn publish(&mut self, display: &TrackDisplay);
}
