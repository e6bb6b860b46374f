// MPD event source and status queries
mod mpd;
pub use self::mpd::{MpdEventSource, MpdStatusQuery, convert_mpd_song, convert_mpd_status, state_name, subsystem_tag};
