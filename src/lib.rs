/// Status, song and notification data types
pub mod data;

/// MPD event source and status queries
pub mod players;

/// Notification pipeline
pub mod notifier;

/// Artwork extraction, icon cache and desktop notification transport
pub mod helpers;

pub mod config;
pub mod error;
pub mod logging;

pub use config::NotifierConfig;
pub use data::{IconArtifact, NotificationContent, PlaybackStatus, TrackMetadata};
pub use error::NotifierError;
pub use notifier::{format_notification, ChangeFilter, EventOutcome, NowPlayingNotifier};
