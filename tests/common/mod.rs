//! Shared fakes for driving the notifier without MPD or D-Bus

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use mpdnotify::error::{NotifierError, Result};
use mpdnotify::notifier::{DesktopNotification, NotificationSink};
use mpdnotify::players::{EventSource, StatusQuery};
use mpdnotify::{PlaybackStatus, TrackMetadata};

/// One scripted item of an event stream
pub enum ScriptedEvent {
    Event(&'static str),
    Failure,
}

/// Event source replaying a fixed script, then ending the stream
pub struct ScriptedEvents {
    script: VecDeque<ScriptedEvent>,
}

impl ScriptedEvents {
    pub fn new(script: Vec<ScriptedEvent>) -> Self {
        Self { script: script.into() }
    }

    pub fn events(tags: &[&'static str]) -> Self {
        Self::new(tags.iter().map(|tag| ScriptedEvent::Event(*tag)).collect())
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Result<Option<String>> {
        match self.script.pop_front() {
            Some(ScriptedEvent::Event(tag)) => Ok(Some(tag.to_string())),
            Some(ScriptedEvent::Failure) => Err(NotifierError::Config("connection reset".to_string())),
            None => Ok(None),
        }
    }
}

/// A status/song pair, or a failure, per query
pub type Snapshot = std::result::Result<(PlaybackStatus, TrackMetadata), String>;

/// Status query answering from a queue of snapshots; the last one repeats
pub struct ScriptedQuery {
    snapshots: VecDeque<Snapshot>,
    current: Option<(PlaybackStatus, TrackMetadata)>,
    /// Number of status queries made
    pub calls: usize,
}

impl ScriptedQuery {
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self {
            snapshots: snapshots.into(),
            current: None,
            calls: 0,
        }
    }
}

impl StatusQuery for ScriptedQuery {
    fn status(&mut self) -> Result<PlaybackStatus> {
        self.calls += 1;
        if let Some(next) = self.snapshots.pop_front() {
            self.current = Some(next.map_err(NotifierError::Config)?);
        }
        match &self.current {
            Some((status, _)) => Ok(status.clone()),
            None => Err(NotifierError::Config("no status scripted".to_string())),
        }
    }

    fn current_song(&mut self) -> Result<TrackMetadata> {
        match &self.current {
            Some((_, song)) => Ok(song.clone()),
            None => Err(NotifierError::Config("no song scripted".to_string())),
        }
    }
}

/// Sink recording every notification; clones share the same record
#[derive(Clone, Default)]
pub struct SharedSink {
    pub sent: Arc<Mutex<Vec<DesktopNotification>>>,
}

impl SharedSink {
    pub fn sent(&self) -> Vec<DesktopNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSink for SharedSink {
    fn deliver(&mut self, notification: &DesktopNotification) -> Result<u32> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(notification.clone());
        Ok(sent.len() as u32)
    }
}

pub fn status(state: &str) -> PlaybackStatus {
    [("state", state)].into_iter().collect()
}

pub fn song(pairs: &[(&str, &str)]) -> TrackMetadata {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
