use std::collections::VecDeque;
use std::net::TcpStream;
use log::{debug, info, warn};
use mpd::{Client, Idle};
use mpd::idle::Subsystem;

use crate::data::{PlaybackStatus, TrackMetadata};
use crate::error::{NotifierError, Result};
use crate::players::player_connection::{EventSource, StatusQuery};

/// Open a client connection to the MPD server at `address` (`host:port`)
fn open_client(address: &str) -> Result<Client<TcpStream>> {
    debug!("Connecting to MPD at {}", address);
    let client = Client::connect(address)?;
    info!("Connected to MPD at {}", address);
    Ok(client)
}

/// Protocol name of a subsystem, e.g. `player` or `stored_playlist`
pub fn subsystem_tag(subsystem: &Subsystem) -> String {
    subsystem.to_string()
}

/// Playback state in notification wording
pub fn state_name(state: &mpd::State) -> &'static str {
    match state {
        mpd::State::Play => "playing",
        mpd::State::Pause => "paused",
        mpd::State::Stop => "stopped",
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Convert an MPD status into the key/value form used by the formatter
pub fn convert_mpd_status(status: &mpd::Status) -> PlaybackStatus {
    let mut result = PlaybackStatus::new();
    result.insert("state", state_name(&status.state));
    result.insert("volume", status.volume.to_string());
    result.insert("repeat", flag(status.repeat));
    result.insert("random", flag(status.random));
    result.insert("playlistlength", status.queue_len.to_string());
    if let Some(place) = &status.song {
        result.insert("song", place.pos.to_string());
    }
    result
}

/// Convert an MPD song into the key/value form used by the formatter.
///
/// `Album`, `Track` and any other tag MPD reports are carried over verbatim.
pub fn convert_mpd_song(song: &mpd::Song) -> TrackMetadata {
    let mut result = TrackMetadata::new();
    result.insert("file", song.file.clone());
    if let Some(title) = &song.title {
        result.insert("Title", title.clone());
    }
    if let Some(artist) = &song.artist {
        result.insert("Artist", artist.clone());
    }
    if let Some(name) = &song.name {
        result.insert("Name", name.clone());
    }
    for (tag, value) in &song.tags {
        result.insert(tag.clone(), value.clone());
    }
    result
}

/// Event source backed by an MPD connection in idle mode
pub struct MpdEventSource {
    address: String,
    client: Option<Client<TcpStream>>,
    pending: VecDeque<String>,
}

impl MpdEventSource {
    /// Create an event source that connects on first use
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            client: None,
            pending: VecDeque::new(),
        }
    }

    /// Create an event source and connect immediately
    pub fn connect(address: &str) -> Result<Self> {
        let mut source = Self::new(address);
        source.client = Some(open_client(address)?);
        Ok(source)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Wait for the next batch of changed subsystems and queue their tags
    fn wait_for_changes(&mut self) -> Result<()> {
        let mut client = match self.client.take() {
            Some(client) => client,
            None => open_client(&self.address)?,
        };

        let result = client.idle(&[]).and_then(|guard| guard.get());
        match result {
            // MPD only ends an idle without changes when the connection went away
            Ok(subsystems) if subsystems.is_empty() => {
                warn!("MPD idle ended without changes, dropping connection");
                Err(NotifierError::ConnectionLost(self.address.clone()))
            }
            Ok(subsystems) => {
                let tags: Vec<String> = subsystems.iter().map(subsystem_tag).collect();
                debug!("Received MPD events: {}", tags.join(", "));
                self.pending.extend(tags);
                self.client = Some(client);
                Ok(())
            }
            Err(e) => {
                // The connection is dropped here and reopened on the next call
                warn!("MPD idle error: {}", e);
                Err(e.into())
            }
        }
    }
}

impl EventSource for MpdEventSource {
    fn next_event(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            self.wait_for_changes()?;
        }
    }
}

/// Status and song queries over a lazily opened MPD command connection
pub struct MpdStatusQuery {
    address: String,
    client: Option<Client<TcpStream>>,
}

impl MpdStatusQuery {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            client: None,
        }
    }

    /// Run a command, dropping the connection if it fails so the next call redials
    fn with_client<T>(&mut self, command: impl FnOnce(&mut Client<TcpStream>) -> mpd::error::Result<T>) -> Result<T> {
        let mut client = match self.client.take() {
            Some(client) => client,
            None => open_client(&self.address)?,
        };

        match command(&mut client) {
            Ok(value) => {
                self.client = Some(client);
                Ok(value)
            }
            Err(e) => {
                debug!("Dropping MPD command connection after error: {}", e);
                Err(e.into())
            }
        }
    }
}

impl StatusQuery for MpdStatusQuery {
    fn status(&mut self) -> Result<PlaybackStatus> {
        let status = self.with_client(|client| client.status())?;
        Ok(convert_mpd_status(&status))
    }

    fn current_song(&mut self) -> Result<TrackMetadata> {
        let song = self.with_client(|client| client.currentsong())?;
        Ok(song.as_ref().map(convert_mpd_song).unwrap_or_default())
    }
}
