use std::fmt;
use serde::{Serialize, Deserialize};

/// Summary and body of a now-playing popup.
///
/// Recomputed for every player event and compared by value with the last one
/// that was delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationContent {
    pub summary: String,
    pub body: String,
}

impl NotificationContent {
    pub fn new(summary: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for NotificationContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.body.replace('\n', " / "))
    }
}
