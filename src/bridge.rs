//! The transport bridge: host notifications in, overlay updates out, and
//! overlay/hotkey requests back into the host.

use crate::artwork::ArtworkStore;
use crate::host::{HostNotification, PlayState, PlayerHost, RepeatMode, TagField};
use crate::hotkeys::HotkeyAction;
use crate::overlay::{
    ButtonCapabilities, MediaOverlay, OverlayButton, OverlayRepeat, OverlayRequest, OverlayStatus,
    TrackDisplay,
};

/// Volume change applied per channel-button press when none is configured.
pub const DEFAULT_VOLUME_STEP: f32 = 0.05;

/// Translates between a [`PlayerHost`] and a [`MediaOverlay`].
///
/// Every entry point is a short synchronous forwarding sequence; the
/// bridge holds no state beyond the artwork buffer.
pub struct TransportBridge<H: PlayerHost, O: MediaOverlay> {
    host: H,
    overlay: O,
    artwork: ArtworkStore,
    volume_step: f32,
}

impl<H: PlayerHost, O: MediaOverlay> TransportBridge<H, O> {
    pub fn new(host: H, overlay: O) -> Self {
        Self::with_volume_step(host, overlay, DEFAULT_VOLUME_STEP)
    }

    /// Like [`new`](Self::new) with a configured channel-button volume step.
    pub fn with_volume_step(host: H, overlay: O, volume_step: f32) -> Self {
        Self {
            host,
            overlay,
            artwork: ArtworkStore::new(),
            volume_step,
        }
    }

    /// Handle a lifecycle or player event from the host.
    pub fn on_notification(&mut self, notification: HostNotification) {
        match notification {
            HostNotification::Startup => {
                self.overlay
                    .set_capabilities(ButtonCapabilities::transport());
                self.overlay
                    .set_status(OverlayStatus::from(self.host.play_state()));
                self.overlay.set_enabled(true);
                self.refresh_display();
                tracing::debug!("overlay initialized");
            }
            HostNotification::PlayStateChanged => self.sync_play_state(),
            HostNotification::TrackChanged => self.refresh_display(),
            HostNotification::Shutdown => self.set_artwork(None),
        }
    }

    /// Handle a request raised by the overlay.
    pub fn on_request(&mut self, request: OverlayRequest) {
        match request {
            OverlayRequest::Button(button) => self.on_button(button),
            OverlayRequest::Seek { position_ms } => self.host.set_position(position_ms),
            // Rate changes have no host-side counterpart.
            OverlayRequest::Rate { .. } => {}
            OverlayRequest::Shuffle { enabled } => self.host.set_shuffle(enabled),
            OverlayRequest::Repeat(mode) => self.host.set_repeat(match mode {
                OverlayRepeat::Track => RepeatMode::One,
                OverlayRepeat::List => RepeatMode::All,
                OverlayRepeat::None => RepeatMode::None,
            }),
        }
    }

    /// Forward a debounced media-key action to the host.
    pub fn on_hotkey(&mut self, action: HotkeyAction) {
        match action {
            HotkeyAction::PlayPause => self.host.play_pause(),
            HotkeyAction::Stop => self.host.stop(),
            HotkeyAction::Previous => self.host.previous_track(),
            HotkeyAction::Next => self.host.next_track(),
        }
    }

    /// Rebuild the overlay display from the host's now-playing track.
    ///
    /// All fields are staged on a fresh display and committed with a
    /// single `publish` at the end. A missing now-playing URL publishes a
    /// blank display and clears the artwork.
    pub fn refresh_display(&mut self) {
        let mut display = TrackDisplay::default();

        let Some(url) = self.host.now_playing_url() else {
            self.set_artwork(None);
            self.overlay.publish(&display);
            return;
        };

        display.album_artist = self.host.now_playing_tag(TagField::AlbumArtist);
        display.album = self.host.now_playing_tag(TagField::Album);
        display.track_count = parse_track_index(&self.host.now_playing_tag(TagField::TrackCount));
        display.artist = self.host.now_playing_tag(TagField::Artist);
        display.title = self.host.now_playing_tag(TagField::Title);
        if display.title.is_empty() {
            display.title = filename_of(&url).to_string();
        }
        display.track_number = parse_track_index(&self.host.now_playing_tag(TagField::TrackNumber));

        let artwork = self.host.artwork(&url);
        self.set_artwork(artwork);

        let display_title = &display.title;
        tracing::debug!(title = %display_title, "refreshing overlay display");
        self.overlay.publish(&display);
    }

    /// Replace (or clear) the artwork buffer and the overlay thumbnail.
    pub fn set_artwork(&mut self, bytes: Option<Vec<u8>>) {
        let token = self.artwork.begin();
        if self.artwork.install(token, bytes) {
            self.overlay.set_thumbnail(self.artwork.current());
        }
    }

    fn sync_play_state(&mut self) {
        match self.host.play_state() {
            PlayState::Playing => {
                self.overlay.set_status(OverlayStatus::Playing);
                self.overlay.set_enabled(true);
            }
            PlayState::Paused => self.overlay.set_status(OverlayStatus::Paused),
            PlayState::Stopped => {
                self.overlay.set_status(OverlayStatus::Stopped);
                self.overlay.set_enabled(false);
            }
        }
    }

    fn on_button(&mut self, button: OverlayButton) {
        match button {
            OverlayButton::Stop => self.host.stop(),
            OverlayButton::Play => {
                if self.host.play_state() != PlayState::Playing {
                    self.host.play_pause();
                }
            }
            OverlayButton::Pause => {
                if self.host.play_state() != PlayState::Paused {
                    self.host.play_pause();
                }
            }
            OverlayButton::Next => self.host.next_track(),
            OverlayButton::Previous => self.host.previous_track(),
            // Not part of the supported transport set.
            OverlayButton::Rewind | OverlayButton::FastForward => {}
            OverlayButton::ChannelUp => {
                let volume = self.host.volume();
                self.host.set_volume(volume + self.volume_step);
            }
            OverlayButton::ChannelDown => {
                let volume = self.host.volume();
                self.host.set_volume(volume - self.volume_step);
            }
        }
    }
}

/// Filename portion of a URL or path: everything after the last `/` or `\`.
fn filename_of(url: &str) -> &str {
    match url.rfind(['/', '\\']) {
        Some(idx) => &url[idx + 1..],
        None => url,
    }
}

/// Parse a numeric track tag; anything non-numeric is treated as unset.
fn parse_track_index(tag: &str) -> Option<u32> {
    tag.trim().parse().ok()
}
