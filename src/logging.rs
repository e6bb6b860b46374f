use std::collections::HashMap;
use std::io::Write;
use log::{debug, info, LevelFilter};
use serde::{Deserialize, Serialize};
use env_logger::{Builder, Target, WriteStyle};

/// Available logging subsystems in mpdnotify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoggingSubsystem {
    /// Main application logging
    #[serde(rename = "main")]
    Main,
    /// MPD connections, idle events and queries
    #[serde(rename = "mpd")]
    Mpd,
    /// Artwork extraction and the icon cache
    #[serde(rename = "icons")]
    Icons,
    /// Notification pipeline and delivery
    #[serde(rename = "notify")]
    Notify,
    /// Configuration loading and parsing
    #[serde(rename = "config")]
    Config,
    /// Third-party dependencies
    #[serde(rename = "deps")]
    Dependencies,
}

impl LoggingSubsystem {
    /// Get the module prefix for this subsystem
    pub fn module_prefix(&self) -> &'static str {
        match self {
            LoggingSubsystem::Main => "mpdnotify",
            LoggingSubsystem::Mpd => "mpdnotify::players",
            LoggingSubsystem::Icons => "mpdnotify::helpers::icon_resolver,mpdnotify::helpers::icon_cache,mpdnotify::helpers::artwork",
            LoggingSubsystem::Notify => "mpdnotify::notifier,mpdnotify::helpers::desktop_notify",
            LoggingSubsystem::Config => "mpdnotify::config",
            LoggingSubsystem::Dependencies => "mpd,lofty,dbus",
        }
    }

    /// Get all available subsystems
    pub fn all() -> Vec<LoggingSubsystem> {
        vec![
            LoggingSubsystem::Main,
            LoggingSubsystem::Mpd,
            LoggingSubsystem::Icons,
            LoggingSubsystem::Notify,
            LoggingSubsystem::Config,
            LoggingSubsystem::Dependencies,
        ]
    }

    /// Parse subsystem name to enum
    pub fn parse(name: &str) -> Option<LoggingSubsystem> {
        match name.to_lowercase().as_str() {
            "main" => Some(LoggingSubsystem::Main),
            "mpd" => Some(LoggingSubsystem::Mpd),
            "icons" => Some(LoggingSubsystem::Icons),
            "notify" => Some(LoggingSubsystem::Notify),
            "config" => Some(LoggingSubsystem::Config),
            "deps" | "dependencies" => Some(LoggingSubsystem::Dependencies),
            _ => None,
        }
    }
}

/// Logging configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Target for log output (stdout, stderr)
    #[serde(default = "default_target")]
    pub target: String,

    /// Whether to include timestamps
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,

    /// Whether to use colored output
    #[serde(default = "default_colors")]
    pub colors: bool,

    /// Subsystem-specific log levels
    #[serde(default)]
    pub subsystems: HashMap<String, String>,

    /// Whether to include module paths in log output
    #[serde(default)]
    pub include_module_path: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_target() -> String {
    "stderr".to_string()
}

fn default_timestamps() -> bool {
    true
}

fn default_colors() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            target: default_target(),
            timestamps: default_timestamps(),
            colors: default_colors(),
            subsystems: HashMap::new(),
            include_module_path: false,
        }
    }
}

impl LoggingConfig {
    /// Convert string log level to LevelFilter
    fn parse_log_level(level: &str) -> LevelFilter {
        match level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => {
                eprintln!("Warning: Unknown log level '{}', defaulting to 'info'", level);
                LevelFilter::Info
            }
        }
    }

    /// Expand the subsystem table into (module, level) pairs
    fn module_filters(&self) -> Vec<(String, LevelFilter)> {
        let mut filters = Vec::new();
        for (subsystem_name, level) in &self.subsystems {
            let level_filter = Self::parse_log_level(level);
            match LoggingSubsystem::parse(subsystem_name) {
                Some(subsystem) => {
                    for prefix in subsystem.module_prefix().split(',') {
                        filters.push((prefix.trim().to_string(), level_filter));
                    }
                }
                // Allow custom module specifications
                None => filters.push((subsystem_name.clone(), level_filter)),
            }
        }
        filters.sort();
        filters
    }

    /// Build the environment filter string for env_logger
    pub fn build_filter_string(&self) -> String {
        let mut filter_parts = vec![self.level.to_lowercase()];
        for (module, level) in self.module_filters() {
            filter_parts.push(format!("{}={}", module, level.as_str().to_lowercase()));
        }
        filter_parts.join(",")
    }

    /// Initialize the logger with this configuration
    pub fn initialize_logger(&self) -> Result<(), String> {
        let filter_string = self.build_filter_string();

        let mut builder = Builder::new();
        builder.filter(None, Self::parse_log_level(&self.level));
        for (module, level) in self.module_filters() {
            builder.filter(Some(module.as_str()), level);
        }

        // RUST_LOG wins over the configured levels
        builder.parse_env("RUST_LOG");

        let write_style = if self.colors {
            WriteStyle::Auto
        } else {
            WriteStyle::Never
        };
        builder.write_style(write_style);

        match self.target.to_lowercase().as_str() {
            "stdout" => {
                builder.target(Target::Stdout);
            }
            "stderr" => {
                builder.target(Target::Stderr);
            }
            _ => {
                return Err(format!("Unknown logging target: {}", self.target));
            }
        }

        let include_module_path = self.include_module_path;
        let timestamps = self.timestamps;

        builder.format(move |buf, record| {
            let mut output = String::new();

            if timestamps {
                output.push_str(&format!("[{}] ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")));
            }

            output.push_str(&format!("[{}] ", record.level()));

            if include_module_path {
                if let Some(module) = record.module_path() {
                    output.push_str(&format!("[{}] ", module));
                }
            }

            output.push_str(&format!("{}", record.args()));

            writeln!(buf, "{}", output)
        });

        builder.try_init()
            .map_err(|e| format!("Failed to initialize logger: {}", e))?;

        debug!("Using logging filter: {}", filter_string);
        info!("Logging initialized at level {}", self.level);
        Ok(())
    }
}
