//! MPRIS backend: the concrete media overlay on the D-Bus session bus.
//!
//! A spawned service thread owns the bus connection and the two MPRIS
//! interfaces. The [`MprisOverlay`] handle mirrors overlay state into a
//! shared cell and nudges the thread, which re-announces the changed
//! properties; incoming calls from the desktop come back as typed
//! [`OverlayRequest`]s on an mpsc channel.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_io::block_on;
use thiserror::Error;
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::overlay::{
    ButtonCapabilities, MediaOverlay, OverlayButton, OverlayRepeat, OverlayRequest, OverlayStatus,
    TrackDisplay,
};

const MPRIS_PATH: &str = "/org/mpris/MediaPlayer2";

/// Failures while bringing the MPRIS service up.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("failed to connect to the session bus: {0}")]
    Connect(#[source] zbus::Error),
    #[error("failed to acquire bus name {name}: {source}")]
    AcquireName {
        name: String,
        #[source]
        source: zbus::Error,
    },
    #[error("failed to register {interface}: {source}")]
    Register {
        interface: &'static str,
        #[source]
        source: zbus::Error,
    },
}

/// Overlay state mirrored for D-Bus property reads.
#[derive(Debug, Default)]
struct SharedState {
    enabled: bool,
    status: OverlayStatus,
    caps: ButtonCapabilities,
    display: TrackDisplay,
    thumbnail: Option<Arc<[u8]>>,
    shuffle: bool,
    repeat: OverlayRepeat,
}

/// Handle to the running MPRIS service.
///
/// Implements [`MediaOverlay`]; dropping it shuts the service thread down
/// and releases the bus name.
pub struct MprisOverlay {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<()>,
}

impl MprisOverlay {
    /// The thumbnail reference currently exposed to the overlay, if any.
    pub fn thumbnail(&self) -> Option<Arc<[u8]>> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.thumbnail.clone())
    }

    fn update(&self, apply: impl FnOnce(&mut SharedState)) {
        if let Ok(mut state) = self.state.lock() {
            apply(&mut state);
        }
        let _ = self.notify.send(());
    }
}

impl MediaOverlay for MprisOverlay {
    fn set_enabled(&mut self, enabled: bool) {
        self.update(|state| state.enabled = enabled);
    }

    fn set_capabilities(&mut self, caps: ButtonCapabilities) {
        self.update(|state| state.caps = caps);
    }

    fn set_status(&mut self, status: OverlayStatus) {
        self.update(|state| state.status = status);
    }

    fn set_thumbnail(&mut self, artwork: Option<Arc<[u8]>>) {
        self.update(|state| state.thumbnail = artwork);
    }

    fn publish(&mut self, display: &TrackDisplay) {
        let display = display.clone();
        self.update(|state| state.display = display);
    }
}

/// Connect to the session bus, claim `org.mpris.MediaPlayer2.<identity>`
/// and start the service thread.
///
/// Requests raised by the desktop arrive on `requests`.
pub fn spawn(
    identity: &str,
    requests: Sender<OverlayRequest>,
) -> Result<MprisOverlay, OverlayError> {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel();

    let connection = block_on(connect(identity, requests, state.clone()))?;
    std::thread::spawn(move || service_loop(connection, notify_rx));

    Ok(MprisOverlay {
        state,
        notify: notify_tx,
    })
}

async fn connect(
    identity: &str,
    requests: Sender<OverlayRequest>,
    state: Arc<Mutex<SharedState>>,
) -> Result<Connection, OverlayError> {
    let connection = Connection::session().await.map_err(OverlayError::Connect)?;

    let name = format!("org.mpris.MediaPlayer2.{identity}");
    connection
        .request_name(name.as_str())
        .await
        .map_err(|source| OverlayError::AcquireName {
            name: name.clone(),
            source,
        })?;

    let object_server = connection.object_server();
    object_server
        .at(
            MPRIS_PATH,
            RootIface {
                identity: identity.to_string(),
            },
        )
        .await
        .map_err(|source| OverlayError::Register {
            interface: "org.mpris.MediaPlayer2",
            source,
        })?;
    object_server
        .at(MPRIS_PATH, PlayerIface { requests, state })
        .await
        .map_err(|source| OverlayError::Register {
            interface: "org.mpris.MediaPlayer2.Player",
            source,
        })?;

    tracing::debug!(name = %name, "mpris service registered");
    Ok(connection)
}

fn service_loop(connection: Connection, notify: Receiver<()>) {
    loop {
        match notify.recv_timeout(Duration::from_secs(1)) {
            Ok(()) => {
                // Collapse a burst of updates into one announcement.
                while notify.try_recv().is_ok() {}
                if let Err(e) = block_on(announce_changes(&connection)) {
                    tracing::warn!("mpris: failed to announce property change: {e}");
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            // Handle dropped: shut down and release the bus name.
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
}

async fn announce_changes(connection: &Connection) -> zbus::Result<()> {
    let iface = connection
        .object_server()
        .interface::<_, PlayerIface>(MPRIS_PATH)
        .await?;
    let player = iface.get().await;
    player
        .playback_status_changed(iface.signal_emitter())
        .await?;
    player.metadata_changed(iface.signal_emitter()).await?;
    player.can_control_changed(iface.signal_emitter()).await?;
    Ok(())
}

struct RootIface {
    identity: String,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No window to raise.
    }

    fn quit(&self) {
        // Plugin lifetime is owned by the host process.
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        &self.identity
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    requests: Sender<OverlayRequest>,
    state: Arc<Mutex<SharedState>>,
}

impl PlayerIface {
    fn send(&self, request: OverlayRequest) {
        let _ = self.requests.send(request);
    }

    fn snapshot<T>(&self, read: impl FnOnce(&SharedState) -> T, fallback: T) -> T {
        match self.state.lock() {
            Ok(state) => read(&state),
            Err(_) => fallback,
        }
    }

    fn capability(&self, pick: impl FnOnce(&ButtonCapabilities) -> bool) -> bool {
        self.snapshot(|state| state.enabled && pick(&state.caps), false)
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        self.send(OverlayRequest::Button(OverlayButton::Next));
    }

    fn previous(&self) {
        self.send(OverlayRequest::Button(OverlayButton::Previous));
    }

    fn play(&self) {
        self.send(OverlayRequest::Button(OverlayButton::Play));
    }

    fn pause(&self) {
        self.send(OverlayRequest::Button(OverlayButton::Pause));
    }

    fn stop(&self) {
        self.send(OverlayRequest::Button(OverlayButton::Stop));
    }

    fn play_pause(&self) {
        // The overlay button set has no toggle; resolve against the mirror.
        let button = match self.snapshot(|state| state.status, OverlayStatus::Stopped) {
            OverlayStatus::Playing => OverlayButton::Pause,
            OverlayStatus::Paused | OverlayStatus::Stopped => OverlayButton::Play,
        };
        self.send(OverlayRequest::Button(button));
    }

    fn seek(&self, _offset_us: i64) {
        // Relative seek has no host-side counterpart.
    }

    fn set_position(&self, _track_id: ObjectPath<'_>, position_us: i64) {
        if position_us >= 0 {
            self.send(OverlayRequest::Seek {
                position_ms: position_us as u64 / 1000,
            });
        }
    }

    fn open_uri(&self, _uri: &str) {
        // The host owns its library; nothing to open from here.
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(state) = self.state.lock() else {
            return "Stopped";
        };
        match state.status {
            OverlayStatus::Stopped => "Stopped",
            OverlayStatus::Playing => "Playing",
            OverlayStatus::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn loop_status(&self) -> &str {
        let Ok(state) = self.state.lock() else {
            return "None";
        };
        match state.repeat {
            OverlayRepeat::None => "None",
            OverlayRepeat::Track => "Track",
            OverlayRepeat::List => "Playlist",
        }
    }

    #[zbus(property)]
    fn set_loop_status(&mut self, value: String) {
        let mode = match value.as_str() {
            "Track" => OverlayRepeat::Track,
            "Playlist" => OverlayRepeat::List,
            "None" => OverlayRepeat::None,
            other => {
                tracing::debug!(value = other, "mpris: ignoring unknown loop status");
                return;
            }
        };
        if let Ok(mut state) = self.state.lock() {
            state.repeat = mode;
        }
        self.send(OverlayRequest::Repeat(mode));
    }

    #[zbus(property)]
    fn rate(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn set_rate(&mut self, rate: f64) {
        self.send(OverlayRequest::Rate { rate });
    }

    #[zbus(property)]
    fn shuffle(&self) -> bool {
        self.snapshot(|state| state.shuffle, false)
    }

    #[zbus(property)]
    fn set_shuffle(&mut self, enabled: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.shuffle = enabled;
        }
        self.send(OverlayRequest::Shuffle { enabled });
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        self.snapshot(|state| metadata_map(&state.display), HashMap::new())
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        self.capability(|caps| caps.next)
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        self.capability(|caps| caps.previous)
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        self.capability(|caps| caps.play)
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        self.capability(|caps| caps.pause)
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        self.snapshot(|state| state.enabled, false)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        self.snapshot(|state| state.enabled, false)
    }
}

fn metadata_map(display: &TrackDisplay) -> HashMap<String, OwnedValue> {
    let mut map = HashMap::new();

    if !display.title.is_empty() {
        insert(&mut map, "xesam:title", Value::from(display.title.clone()));
    }
    if !display.artist.is_empty() {
        insert(
            &mut map,
            "xesam:artist",
            Value::from(vec![display.artist.clone()]),
        );
    }
    if !display.album.is_empty() {
        insert(&mut map, "xesam:album", Value::from(display.album.clone()));
    }
    if !display.album_artist.is_empty() {
        insert(
            &mut map,
            "xesam:albumArtist",
            Value::from(vec![display.album_artist.clone()]),
        );
    }
    if let Some(number) = display.track_number {
        insert(&mut map, "xesam:trackNumber", Value::from(number as i32));
    }

    map
}

fn insert(map: &mut HashMap<String, OwnedValue>, key: &str, value: Value<'_>) {
    match OwnedValue::try_from(value) {
        Ok(value) => {
            map.insert(key.to_string(), value);
        }
        Err(e) => tracing::warn!(key, "mpris: failed to box metadata value: {e}"),
    }
}

#[cfg(test)]
mod tests;
