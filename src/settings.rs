//! Player settings and preferences
//!
//! Persisted separately from run statistics in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::camera::ScrollMode;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scroll the page to keep the avatar centered
    pub camera_follow: bool,
    /// Animate scrolling instead of jumping
    pub smooth_scroll: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (no smooth scrolling)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera_follow: true,
            smooth_scroll: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective smooth scrolling (respects reduced_motion)
    pub fn effective_smooth_scroll(&self) -> bool {
        self.smooth_scroll && !self.reduced_motion
    }

    /// Scroll mode for camera follow
    pub fn scroll_mode(&self) -> ScrollMode {
        if self.effective_smooth_scroll() {
            ScrollMode::Smooth
        } else {
            ScrollMode::Instant
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gap_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_smooth_scroll() {
        let mut settings = Settings::default();
        assert_eq!(settings.scroll_mode(), ScrollMode::Smooth);

        settings.reduced_motion = true;
        assert!(!settings.effective_smooth_scroll());
        assert_eq!(settings.scroll_mode(), ScrollMode::Instant);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "show_fps": true }"#).unwrap();
        assert!(settings.show_fps);
        assert!(settings.camera_follow);
        assert!(settings.smooth_scroll);
    }
}
