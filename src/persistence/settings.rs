use crate::session::DEFAULT_QUICK_MINUTES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Focus screen refresh interval in milliseconds
    pub tick_ms: u64,
    /// Quick-start duration offered when an item has no allocation
    pub default_quick_minutes: u32,
    /// Desktop notification when a session clock runs out
    pub notifications: bool,
    /// Log filter used when STINT_LOG is not set
    pub log_level: String,
    /// Plant glyphs as emoji; plain ASCII otherwise
    pub use_emoji: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            default_quick_minutes: DEFAULT_QUICK_MINUTES,
            notifications: true,
            log_level: "info".to_string(),
            use_emoji: true,
        }
    }
}

/// Load settings from settings.json (defaults if the file doesn't exist)
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_quick_minutes, 25);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "tick_ms": 1000 }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.tick_ms, 1000);
        assert!(settings.notifications);
        assert_eq!(settings.log_level, "info");
        assert!(settings.use_emoji);
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            default_quick_minutes: 15,
            notifications: false,
            use_emoji: false,
            ..Settings::default()
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }
}
