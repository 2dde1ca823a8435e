//! Playground settings
//!
//! Persisted as JSON in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable spawn and loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Milliseconds between spawns while the pointer is held
    pub spawn_interval_ms: f64,
    /// Milliseconds between update-and-render frames
    pub frame_interval_ms: f64,
    /// Largest clock step accepted from the host in one advance
    pub max_frame_ms: f64,

    // === Circles ===
    pub circle_radius: f64,
    /// CSS color for new circles
    pub fill_style: String,
    /// Velocity components are drawn from [0, max_speed)
    pub max_speed: f64,

    // === Loop ===
    /// Also stop the update-and-render loop on pointer release.
    /// Off by default: the loop keeps running once started.
    pub stop_render_on_release: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            frame_interval_ms: FRAME_INTERVAL_MS,
            max_frame_ms: MAX_FRAME_MS,

            circle_radius: CIRCLE_RADIUS,
            fill_style: CIRCLE_FILL.to_string(),
            max_speed: CIRCLE_MAX_SPEED,

            stop_render_on_release: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "bouncing_circles_settings";

    /// Replace unusable timing values with their defaults.
    ///
    /// Task periods must be positive and finite, otherwise a recurring task
    /// can never be rescheduled. Returns `true` if anything was replaced.
    pub fn sanitize(&mut self) -> bool {
        let defaults = Self::default();
        let mut fixed = false;
        for (name, value, default) in [
            ("spawn_interval_ms", &mut self.spawn_interval_ms, defaults.spawn_interval_ms),
            ("frame_interval_ms", &mut self.frame_interval_ms, defaults.frame_interval_ms),
            ("max_frame_ms", &mut self.max_frame_ms, defaults.max_frame_ms),
        ] {
            if !(*value > 0.0 && value.is_finite()) {
                log::warn!("Invalid {} ({}), using {}", name, value, default);
                *value = default;
                fixed = true;
            }
        }
        fixed
    }

    /// Parse stored JSON, falling back to defaults for the whole record if
    /// it does not parse and per field if a timing value is unusable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(mut settings) => {
                settings.sanitize();
                settings
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Load settings from LocalStorage (WASM only).
    ///
    /// The effective settings are written back, so the key always exists
    /// and holds valid values for hand editing.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let settings = match storage
            .as_ref()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
        {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };

        settings.save();
        settings
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage.set_item(Self::STORAGE_KEY, &self.to_json()).is_ok() {
                log::info!("Settings saved");
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.spawn_interval_ms, 200.0);
        assert_eq!(s.frame_interval_ms, 5.0);
        assert_eq!(s.circle_radius, 20.0);
        assert_eq!(s.fill_style, "#E7E247");
        assert!(!s.stop_render_on_release);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings =
            serde_json::from_str(r#"{"fill_style":"red","stop_render_on_release":true}"#).unwrap();
        assert_eq!(s.fill_style, "red");
        assert!(s.stop_render_on_release);
        assert_eq!(s.spawn_interval_ms, SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_from_json_replaces_bad_periods() {
        let s = Settings::from_json(
            r#"{"spawn_interval_ms":-1.0,"frame_interval_ms":0.0,"max_frame_ms":50.0,"fill_style":"blue"}"#,
        );
        assert_eq!(s.spawn_interval_ms, SPAWN_INTERVAL_MS);
        assert_eq!(s.frame_interval_ms, FRAME_INTERVAL_MS);
        assert_eq!(s.max_frame_ms, 50.0);
        assert_eq!(s.fill_style, "blue");
    }

    #[test]
    fn test_from_json_garbage_gives_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_sanitize_nan_and_infinite() {
        let mut s = Settings {
            frame_interval_ms: f64::NAN,
            spawn_interval_ms: f64::INFINITY,
            ..Default::default()
        };
        assert!(s.sanitize());
        assert_eq!(s, Settings::default());
        assert!(!s.sanitize());
    }

    #[test]
    fn test_json_written_back_reads_the_same() {
        let s = Settings {
            fill_style: "#123456".into(),
            stop_render_on_release: true,
            ..Default::default()
        };
        assert_eq!(Settings::from_json(&s.to_json()), s);
    }
}
