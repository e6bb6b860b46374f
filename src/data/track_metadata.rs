/// Metadata of the current track as reported by the server
use std::collections::HashMap;
use std::fmt;
use serde::{Serialize, Deserialize};

/// Key/value view of the current song.
///
/// Keys use the server's tag names (`Artist`, `Title`, `Album`, `Track`, `file`).
/// Presence matters: an `Album` key holding an empty string is different from no
/// `Album` key at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackMetadata {
    fields: HashMap<String, String>,
}

impl TrackMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn artist(&self) -> Option<&str> {
        self.get("Artist")
    }

    pub fn title(&self) -> Option<&str> {
        self.get("Title")
    }

    pub fn album(&self) -> Option<&str> {
        self.get("Album")
    }

    pub fn track(&self) -> Option<&str> {
        self.get("Track")
    }

    /// Path of the song relative to the music directory, or a stream URL
    pub fn file(&self) -> Option<&str> {
        self.get("file")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TrackMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl fmt::Display for TrackMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}",
            self.title().unwrap_or("Unknown"),
            self.artist().unwrap_or("Unknown"))?;
        if let Some(file) = self.file() {
            write!(f, " [{}]", file)?;
        }
        Ok(())
    }
}
