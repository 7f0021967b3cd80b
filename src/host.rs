//! Player-host boundary: the control surface the hosting player exposes
//! to the bridge.
//!
//! The host owns playback, the library and tag storage; the bridge only
//! calls through [`PlayerHost`] and reacts to [`HostNotification`]s.

/// Playback state as reported by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlayState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Repeat mode understood by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RepeatMode {
    /// No repeat.
    None,
    /// Repeat the current track.
    One,
    /// Repeat the whole list.
    All,
}

/// Tag fields the bridge reads for the now-playing display.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TagField {
    Title,
    Artist,
    Album,
    AlbumArtist,
    TrackNumber,
    TrackCount,
}

/// Lifecycle and player events delivered by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HostNotification {
    /// The plugin has been loaded; acquire overlay and hook resources.
    Startup,
    PlayStateChanged,
    TrackChanged,
    /// The plugin is being unloaded; release everything acquired at startup.
    Shutdown,
}

/// Control interface of the hosting player.
///
/// Volume is a linear 0..1 value; out-of-range values are clamped by the
/// host, not by callers. Tag lookups return an empty string for tags the
/// current file does not carry.
pub trait PlayerHost {
    fn play_state(&self) -> PlayState;
    /// Toggle between playing and paused (starts playback when stopped).
    fn play_pause(&self);
    fn stop(&self);
    fn next_track(&self);
    fn previous_track(&self);
    /// Seek to an absolute position in milliseconds.
    fn set_position(&self, position_ms: u64);
    fn volume(&self) -> f32;
    fn set_volume(&self, volume: f32);
    fn set_shuffle(&self, enabled: bool);
    fn set_repeat(&self, mode: RepeatMode);
    /// URL of the currently loaded file, if any.
    fn now_playing_url(&self) -> Option<String>;
    /// Read a tag of the currently loaded file (empty string when unset).
    fn now_playing_tag(&self, field: TagField) -> String;
    /// Fetch artwork bytes for `url`, preferring non-embedded sources.
    fn artwork(&self, url: &str) -> Option<Vec<u8>>;
}
