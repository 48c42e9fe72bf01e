//! Starfield settings and preferences
//!
//! Persisted in LocalStorage, separate from the profile data.

use serde::{Deserialize, Serialize};

use crate::consts::SPAWN_PROBABILITY;
use crate::sim::FieldConfig;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Persistent stars for this preset
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 120,
            QualityPreset::Medium => 250,
            QualityPreset::High => 400,
        }
    }
}

/// Starfield settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Star density preset
    pub quality: QualityPreset,
    /// Spawn shooting stars at all
    pub shooting_stars: bool,
    /// Per-frame shooting star chance (0.0 - 1.0)
    pub spawn_probability: f32,

    // === Accessibility ===
    /// Reduced motion (no shooting stars)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            shooting_stars: true,
            spawn_probability: SPAWN_PROBABILITY,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective shooting stars (respects reduced_motion)
    pub fn effective_shooting_stars(&self) -> bool {
        self.shooting_stars && !self.reduced_motion
    }

    /// Effective spawn probability, clamped to a valid chance
    pub fn effective_spawn_probability(&self) -> f32 {
        if !self.effective_shooting_stars() {
            0.0
        } else {
            self.spawn_probability.clamp(0.0, 1.0)
        }
    }

    /// Simulation parameters for these settings
    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            star_count: self.quality.star_count(),
            spawn_probability: self.effective_spawn_probability(),
            ..FieldConfig::default()
        }
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "starfield_settings";

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
                    Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
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

        match storage {
            Some(storage) => {
                self.store_with(|key, json| storage.set_item(key, json));
            }
            None => log::warn!("LocalStorage unavailable, settings not saved"),
        }
    }

    /// Serialize and pass `(key, json)` to `write`; false if nothing was stored
    pub fn store_with<E: std::fmt::Debug>(
        &self,
        write: impl FnOnce(&str, &str) -> Result<(), E>,
    ) -> bool {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Settings not serializable: {}", e);
                return false;
            }
        };
        match write(Self::STORAGE_KEY, &json) {
            Ok(()) => {
                log::info!("Settings saved");
                true
            }
            Err(e) => {
                log::warn!("Settings not saved: {:?}", e);
                false
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
    fn test_default_matches_reference_field() {
        let config = Settings::default().field_config();
        assert_eq!(config.star_count, 250);
        assert!((config.spawn_probability - 0.02).abs() < f32::EPSILON);
    }

    #[test]
    fn test_presets() {
        assert_eq!(Settings::from_preset(QualityPreset::Low).field_config().star_count, 120);
        assert_eq!(Settings::from_preset(QualityPreset::High).field_config().star_count, 400);
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_reduced_motion_disables_shooting_stars() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_shooting_stars());
        assert_eq!(settings.field_config().spawn_probability, 0.0);

        let settings = Settings {
            shooting_stars: false,
            ..Default::default()
        };
        assert_eq!(settings.field_config().spawn_probability, 0.0);
    }

    #[test]
    fn test_spawn_probability_clamped() {
        let settings = Settings {
            spawn_probability: 3.0,
            ..Default::default()
        };
        assert_eq!(settings.effective_spawn_probability(), 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"quality":"High"}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.shooting_stars);
        assert!(!settings.reduced_motion);
    }

    #[test]
    fn test_store_reports_write_failure() {
        let settings = Settings::default();
        let stored = settings.store_with(|_, _| Err("QuotaExceededError"));
        assert!(!stored);
    }

    #[test]
    fn test_store_writes_under_key() {
        let settings = Settings::from_preset(QualityPreset::Low);
        let mut written = None;
        let stored = settings.store_with(|key, json| {
            written = Some((key.to_string(), json.to_string()));
            Ok::<(), ()>(())
        });

        assert!(stored);
        let (key, json) = written.unwrap();
        assert_eq!(key, "starfield_settings");
        let restored: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, settings);
    }
}
