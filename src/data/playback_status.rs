/// Snapshot of the player status as reported by the server
use std::collections::HashMap;
use std::fmt;
use serde::{Serialize, Deserialize};

/// Value of the `state` field when nothing is playing
pub const STATE_STOPPED: &str = "stopped";

/// Key/value view of the server status.
///
/// Only `state` is interpreted by the notifier; the remaining fields are kept so
/// that they show up in debug logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybackStatus {
    fields: HashMap<String, String>,
}

impl PlaybackStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a raw status field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// The playback state (`playing`, `paused` or `stopped`), if reported
    pub fn state(&self) -> Option<&str> {
        self.get("state")
    }

    /// True only when the state is explicitly reported as stopped.
    ///
    /// A missing state counts as not stopped.
    pub fn is_stopped(&self) -> bool {
        self.state() == Some(STATE_STOPPED)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaybackStatus {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state={}", self.state().unwrap_or("<none>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_state_is_not_stopped() {
        let status = PlaybackStatus::new();
        assert_eq!(status.state(), None);
        assert!(!status.is_stopped());
    }

    #[test]
    fn test_stopped_state() {
        let status: PlaybackStatus = [("state", "stopped")].into_iter().collect();
        assert!(status.is_stopped());

        let status: PlaybackStatus = [("state", "paused")].into_iter().collect();
        assert!(!status.is_stopped());
    }

    #[test]
    fn test_deserialize_from_plain_map() {
        let status: PlaybackStatus = serde_json::from_str(r#"{"state":"playing","volume":"80"}"#).unwrap();
        assert_eq!(status.state(), Some("playing"));
        assert_eq!(status.get("volume"), Some("80"));
        assert_eq!(status.len(), 2);
    }
}
