//! Configuration persistence for xrectsel settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::template::DEFAULT_FORMAT;

/// Application configuration read at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XRectSelConfig {
    /// Output template used when none is given on the command line
    pub format: String,
    /// X display to connect to (None = `$DISPLAY`)
    pub display: Option<String>,
}

impl XRectSelConfig {
    /// Directory name under the user's config dir
    pub const ID: &'static str = "xrectsel";

    /// Default location: `$XDG_CONFIG_HOME/xrectsel/config.json`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from the default location, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from `path`, or return defaults if unavailable
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("Could not read config {}: {}", path.display(), err);
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                log::warn!(
                    "Error loading config {}, using defaults: {}",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }
}

impl Default for XRectSelConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            display: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = XRectSelConfig::load_from(&dir.path().join("config.json"));
        assert_eq!(config, XRectSelConfig::default());
        assert_eq!(config.format, "%wx%h+%x+%y\n");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "format": "%x,%y %wx%h" }}"#).unwrap();

        let config = XRectSelConfig::load_from(file.path());
        assert_eq!(config.format, "%x,%y %wx%h");
        assert_eq!(config.display, None);
    }

    #[test]
    fn test_display_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "display": ":1" }}"#).unwrap();

        let config = XRectSelConfig::load_from(file.path());
        assert_eq!(config.display.as_deref(), Some(":1"));
        assert_eq!(config.format, DEFAULT_FORMAT);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "format = not json").unwrap();

        assert_eq!(
            XRectSelConfig::load_from(file.path()),
            XRectSelConfig::default()
        );
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = XRectSelConfig {
            format: "%X %Y".to_string(),
            display: Some(":0".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: XRectSelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
