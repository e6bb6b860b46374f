use crate::data::{PlaybackStatus, TrackMetadata};
use crate::error::Result;

/// Tag of the subsystem event the notifier reacts to
pub const PLAYER_EVENT: &str = "player";

/// Source of subsystem-change events (`player`, `mixer`, `playlist`, ...)
pub trait EventSource {
    /// Block until the next event.
    ///
    /// Returns `Ok(None)` when the stream has ended for good. An error means the
    /// connection broke; calling again attempts to re-establish it.
    fn next_event(&mut self) -> Result<Option<String>>;
}

/// Request/response access to the current player state
pub trait StatusQuery {
    /// Current playback status
    fn status(&mut self) -> Result<PlaybackStatus>;

    /// Metadata of the current song, empty when the queue has no current song
    fn current_song(&mut self) -> Result<TrackMetadata>;
}
