use serde::Deserialize;

/// Top-level bridge settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/baton/config.toml` or `~/.config/baton/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BATON__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub overlay: OverlaySettings,
    pub controls: ControlsSettings,
    pub hotkeys: HotkeySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overlay: OverlaySettings::default(),
            controls: ControlsSettings::default(),
            hotkeys: HotkeySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Identity advertised to the overlay; also the suffix of the
    /// `org.mpris.MediaPlayer2.` bus name, so it is restricted to ASCII
    /// letters, digits and underscores.
    pub identity: String,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            identity: "baton".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume change applied per channel-button press (linear, 0..1).
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { volume_step: 0.05 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HotkeySettings {
    /// Whether the global media-key hook is attached at startup.
    pub enabled: bool,
    /// Window (milliseconds) within which a repeated media-key press is
    /// dropped as hardware double-firing.
    pub debounce_ms: u64,
}

impl Default for HotkeySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 2000,
        }
    }
}
