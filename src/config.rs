// Configuration for mpdnotify
//
// Every field carries a serde default so that a partial JSON file (or none at all)
// yields a usable configuration.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{NotifierError, Result};
use crate::logging::LoggingConfig;

/// Named desktop icon used when no bundled icon can be located
pub const FALLBACK_ICON_NAME: &str = "emblem-music";

/// File name of the icon shipped next to the executable
pub const BUNDLED_ICON_FILE: &str = "music-note.svg";

/// Runtime configuration of the notifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// MPD server hostname
    #[serde(default = "default_mpd_host")]
    pub mpd_host: String,

    /// MPD server port
    #[serde(default = "default_mpd_port")]
    pub mpd_port: u16,

    /// Root of the MPD music directory, used to locate song files
    #[serde(default = "default_music_directory")]
    pub music_directory: PathBuf,

    /// Icon used when no artwork is found (file path or icon name)
    #[serde(default = "default_icon")]
    pub default_icon: String,

    /// How long the popup stays visible, in milliseconds
    #[serde(default = "default_popup_timeout")]
    pub popup_timeout_ms: i32,

    /// Application name reported to the notification server
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Replace the previous popup instead of stacking a new one
    #[serde(default)]
    pub replace_previous: bool,

    /// Directory holding extracted artwork
    #[serde(default = "default_icon_cache_dir")]
    pub icon_cache_dir: PathBuf,

    /// File name prefix of extracted artwork
    #[serde(default = "default_icon_cache_prefix")]
    pub icon_cache_prefix: String,

    /// Cover art file names looked up next to the song, in order
    #[serde(default = "default_cover_files")]
    pub cover_files: Vec<String>,

    /// Extra string hints passed to the notification server
    #[serde(default)]
    pub hints: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_mpd_host() -> String {
    "localhost".to_string()
}

fn default_mpd_port() -> u16 {
    6600
}

fn default_music_directory() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join("Music"),
        None => PathBuf::from("Music"),
    }
}

fn default_icon() -> String {
    match env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.join(BUNDLED_ICON_FILE).to_string_lossy().into_owned(),
            None => FALLBACK_ICON_NAME.to_string(),
        },
        Err(_) => FALLBACK_ICON_NAME.to_string(),
    }
}

fn default_popup_timeout() -> i32 {
    5000
}

fn default_app_name() -> String {
    "mpd".to_string()
}

fn default_icon_cache_dir() -> PathBuf {
    env::temp_dir()
}

fn default_icon_cache_prefix() -> String {
    "mpdnotify".to_string()
}

fn default_cover_files() -> Vec<String> {
    ["album.jpg", "album.png", "cover.jpg", "cover.png"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for NotifierConfig {
    fn default() -> Self {
        NotifierConfig {
            mpd_host: default_mpd_host(),
            mpd_port: default_mpd_port(),
            music_directory: default_music_directory(),
            default_icon: default_icon(),
            popup_timeout_ms: default_popup_timeout(),
            app_name: default_app_name(),
            replace_previous: false,
            icon_cache_dir: default_icon_cache_dir(),
            icon_cache_prefix: default_icon_cache_prefix(),
            cover_files: default_cover_files(),
            hints: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl NotifierConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NotifierError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the configuration used at startup.
    ///
    /// An explicitly given path must exist. Without one, the per-user config file
    /// is used when present, defaults otherwise. Nothing is logged here since the
    /// logger is configured from the result; environment overrides are applied
    /// separately with [`NotifierConfig::apply_env`].
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        match explicit {
            Some(path) => Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf()))),
            None => match user_config_path() {
                Some(path) if path.exists() => Ok((Self::from_file(&path)?, ConfigSource::File(path))),
                _ => Ok((Self::default(), ConfigSource::Defaults)),
            },
        }
    }

    /// Apply `MPD_HOST`/`MPD_PORT` from the environment, returning warnings to report
    pub fn apply_env(&mut self) -> Vec<String> {
        self.apply_env_overrides(
            env::var("MPD_HOST").ok().as_deref(),
            env::var("MPD_PORT").ok().as_deref(),
        )
    }

    /// Apply the conventional MPD environment overrides.
    ///
    /// Invalid values leave the configured setting in place and are returned as
    /// warnings for the caller to report.
    pub fn apply_env_overrides(&mut self, host: Option<&str>, port: Option<&str>) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(host) = host.filter(|h| !h.is_empty()) {
            debug!("MPD_HOST overrides configured host: {}", host);
            self.mpd_host = host.to_string();
        }
        if let Some(port) = port.filter(|p| !p.is_empty()) {
            match port.parse::<u16>() {
                Ok(port) => {
                    debug!("MPD_PORT overrides configured port: {}", port);
                    self.mpd_port = port;
                }
                Err(_) => warnings.push(format!(
                    "Ignoring invalid MPD_PORT value '{}', using port {}",
                    port, self.mpd_port
                )),
            }
        }
        warnings
    }

    /// Address in `host:port` form
    pub fn mpd_address(&self) -> String {
        format!("{}:{}", self.mpd_host, self.mpd_port)
    }
}

/// Where the startup configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Location of the per-user configuration file
pub fn user_config_path() -> Option<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("mpdnotify").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = NotifierConfig::from_json(r#"{"mpd_host": "music.local", "replace_previous": true}"#).unwrap();
        assert_eq!(config.mpd_host, "music.local");
        assert_eq!(config.mpd_port, 6600);
        assert!(config.replace_previous);
        assert_eq!(config.popup_timeout_ms, 5000);
        assert_eq!(config.app_name, "mpd");
        assert_eq!(config.icon_cache_prefix, "mpdnotify");
        assert_eq!(config.cover_files, vec!["album.jpg", "album.png", "cover.jpg", "cover.png"]);
        assert!(config.hints.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_icon_points_next_to_executable() {
        let icon = default_icon();
        assert!(icon == FALLBACK_ICON_NAME || icon.ends_with(BUNDLED_ICON_FILE));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let result = NotifierConfig::from_json(r#"{"mpd_port": "not a number"}"#);
        assert!(matches!(result, Err(NotifierError::Json(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = NotifierConfig::default();
        let warnings = config.apply_env_overrides(Some("10.0.0.5"), Some("6601"));
        assert!(warnings.is_empty());
        assert_eq!(config.mpd_address(), "10.0.0.5:6601");

        let warnings = config.apply_env_overrides(Some(""), None);
        assert!(warnings.is_empty());
        assert_eq!(config.mpd_address(), "10.0.0.5:6601");
    }

    #[test]
    fn test_invalid_port_override_is_reported() {
        let mut config = NotifierConfig::default();
        let warnings = config.apply_env_overrides(None, Some("66OO"));

        assert_eq!(config.mpd_port, 6600);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("66OO"));
        assert!(warnings[0].contains("6600"));
    }

    #[test]
    fn test_load_reports_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mpd_port": 6601}}"#).unwrap();

        let (config, source) = NotifierConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.mpd_port, 6601);
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
        assert_eq!(source.to_string(), file.path().display().to_string());
        assert_eq!(ConfigSource::Defaults.to_string(), "built-in defaults");
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"popup_timeout_ms": 2500, "hints": {{"category": "x-mpd"}}}}"#).unwrap();

        let config = NotifierConfig::from_file(file.path()).unwrap();
        assert_eq!(config.popup_timeout_ms, 2500);
        assert_eq!(config.hints.get("category").map(String::as_str), Some("x-mpd"));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = NotifierConfig::from_file("/nonexistent/mpdnotify/config.json");
        assert!(matches!(result, Err(NotifierError::Config(_))));
    }
}
