//! Game settings and preferences
//!
//! Persisted separately from run state in LocalStorage on the web; native
//! builds fall back to defaults.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the difficulty meter
    pub show_difficulty: bool,

    // === Controls ===
    /// On-screen touch buttons (mobile)
    pub touch_controls: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no background parallax, no bounce squash)
    pub reduced_motion: bool,
    /// High contrast platform colors
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: false,
            show_difficulty: true,

            touch_controls: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sky_hopper_settings";

    /// Effective sound volume (renderers multiply sfx by master)
    pub fn effective_volume(&self) -> f32 {
        self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
