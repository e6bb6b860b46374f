/// Connections to the music player daemon
mod player_connection;
pub mod mpd;

// Re-export the collaborator traits
pub use player_connection::{EventSource, StatusQuery, PLAYER_EVENT};
pub use self::mpd::{MpdEventSource, MpdStatusQuery};
