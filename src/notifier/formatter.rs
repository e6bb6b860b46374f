use crate::data::{NotificationContent, PlaybackStatus, TrackMetadata};

pub const SUMMARY_PREFIX: &str = "MPD: ";
pub const DEFAULT_ARTIST: &str = "No artist";
pub const DEFAULT_TITLE: &str = "No title";
pub const DEFAULT_TRACK: &str = "0";

/// Build the popup summary and body for a status/song snapshot.
///
/// The summary is the raw state prefixed with `MPD: `. A stopped player gets an
/// empty body; otherwise the body is title and artist on separate lines, plus a
/// `#track album` line whenever the song carries an `Album` tag at all.
pub fn format_notification(status: &PlaybackStatus, song: &TrackMetadata) -> NotificationContent {
    let summary = format!("{}{}", SUMMARY_PREFIX, status.state().unwrap_or(""));

    if status.is_stopped() {
        return NotificationContent::new(summary, "");
    }

    let title = song.title().unwrap_or(DEFAULT_TITLE);
    let artist = song.artist().unwrap_or(DEFAULT_ARTIST);
    let mut body = format!("{}\n{}", title, artist);

    if let Some(album) = song.album() {
        let track = song.track().unwrap_or(DEFAULT_TRACK);
        body.push_str(&format!("\n#{} {}", track, album));
    }

    NotificationContent::new(summary, body)
}
