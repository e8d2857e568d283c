// src/settings.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::platform::Platform;

pub const APP_NAME: &str = "textpad";
pub const MIN_WINDOW_SIZE: [f32; 2] = [300.0, 200.0];

/// User preferences, stored as `settings.json` in the platform config dir.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub font_size: f32,
    pub window_size: [f32; 2],
    pub dark_mode: bool,
    pub undo_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            window_size: [640.0, 480.0],
            dark_mode: true,
            undo_capacity: 100,
        }
    }
}

impl Settings {
    pub fn path(platform: &dyn Platform) -> Result<PathBuf> {
        Ok(platform.config_dir(APP_NAME)?.join("settings.json"))
    }

    /// Clamp values a hand-edited file might get wrong.
    pub fn sanitized(mut self) -> Self {
        if !self.font_size.is_finite() {
            self.font_size = Self::default().font_size;
        }
        self.font_size = self.font_size.clamp(6.0, 72.0);
        for (v, min) in self.window_size.iter_mut().zip(MIN_WINDOW_SIZE) {
            if !v.is_finite() || *v < min {
                *v = min;
            }
        }
        self.undo_capacity = self.undo_capacity.max(1);
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        let parsed: Settings = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse settings {}", path.display()))?;
        Ok(parsed.sanitized())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        atomic_write(path, &text)
            .with_context(|| format!("Failed to write settings {}", path.display()))
    }

    /// Load settings, seeding the file with defaults on first run.
    /// Any failure falls back to defaults.
    pub fn load_or_init(platform: &dyn Platform) -> Self {
        let path = match Self::path(platform) {
            Ok(p) => p,
            Err(e) => {
                warn!("{:#}; using default settings", e);
                return Self::default();
            }
        };

        if !path.exists() {
            let defaults = Self::default();
            match defaults.save(&path) {
                Ok(()) => info!(path = %path.display(), "wrote default settings"),
                Err(e) => warn!("{:#}", e),
            }
            return defaults;
        }

        match Self::load(&path) {
            Ok(s) => s,
            Err(e) => {
                warn!("{:#}; using default settings", e);
                Self::default()
            }
        }
    }
}

fn atomic_write(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, text)?;
    if path.exists() {
        let _ = std::fs::remove_file(path);
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::scripted::ScriptedPlatform;

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let platform = ScriptedPlatform::with_config_dir(dir.path().join("cfg"));

        let s = Settings::load_or_init(&platform);
        assert_eq!(s, Settings::default());

        let path = dir.path().join("cfg").join("settings.json");
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"font_size": 200.0, "window_size": [100.0, 900.0]}"#).unwrap();

        let s = Settings::load(&path).unwrap();
        assert_eq!(s.font_size, 72.0);
        assert_eq!(s.window_size, [300.0, 900.0]);
        assert!(s.dark_mode);
        assert_eq!(s.undo_capacity, 100);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        let platform = ScriptedPlatform::with_config_dir(dir.path().to_path_buf());
        assert_eq!(Settings::load_or_init(&platform), Settings::default());
    }

    #[test]
    fn missing_config_dir_uses_defaults() {
        let platform = ScriptedPlatform::new();
        assert_eq!(Settings::load_or_init(&platform), Settings::default());
    }
}
