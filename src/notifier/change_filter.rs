use crate::data::NotificationContent;

/// Remembers the last delivered notification and rejects exact repeats.
#[derive(Debug, Clone, Default)]
pub struct ChangeFilter {
    last: NotificationContent,
}

impl ChangeFilter {
    /// Start with nothing delivered (empty summary and body)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known previously delivered notification
    pub fn with_last(last: NotificationContent) -> Self {
        Self { last }
    }

    pub fn last(&self) -> &NotificationContent {
        &self.last
    }

    /// True if `content` differs from the last delivered notification
    pub fn is_changed(&self, content: &NotificationContent) -> bool {
        &self.last != content
    }

    /// Record `content` as delivered if it is new.
    ///
    /// Returns whether the caller should deliver it.
    pub fn accept(&mut self, content: &NotificationContent) -> bool {
        if !self.is_changed(content) {
            return false;
        }
        self.last = content.clone();
        true
    }
}
