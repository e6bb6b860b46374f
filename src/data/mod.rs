// Data structures for mpdnotify

pub mod icon_artifact;
pub mod notification_content;
pub mod playback_status;
pub mod track_metadata;

pub use icon_artifact::IconArtifact;
pub use notification_content::NotificationContent;
pub use playback_status::PlaybackStatus;
pub use track_metadata::TrackMetadata;
