use thiserror::Error;

/// Error types that can occur while watching the server and delivering notifications
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("MPD error: {0}")]
    Mpd(#[from] mpd::error::Error),

    #[cfg(unix)]
    #[error("D-Bus error: {0}")]
    Dbus(#[from] dbus::Error),

    #[error("Connection to {0} lost")]
    ConnectionLost(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NotifierError>;
