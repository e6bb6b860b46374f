use std::collections::HashMap;
use log::info;

use crate::config::NotifierConfig;
use crate::data::{IconArtifact, NotificationContent};
use crate::error::Result;

/// Everything the notification server needs to show one popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopNotification {
    pub app_name: String,
    /// Id of a popup to replace, 0 for a new one
    pub replaces_id: u32,
    pub icon: IconArtifact,
    pub summary: String,
    pub body: String,
    /// Display duration in milliseconds
    pub expire_timeout_ms: i32,
    pub hints: HashMap<String, String>,
}

impl DesktopNotification {
    pub fn new(config: &NotifierConfig, content: &NotificationContent, icon: IconArtifact, replaces_id: u32) -> Self {
        Self {
            app_name: config.app_name.clone(),
            replaces_id,
            icon,
            summary: content.summary.clone(),
            body: content.body.clone(),
            expire_timeout_ms: config.popup_timeout_ms,
            hints: config.hints.clone(),
        }
    }
}

/// Delivers notifications to the desktop
pub trait NotificationSink {
    /// Show the notification and return the id assigned by the server
    fn deliver(&mut self, notification: &DesktopNotification) -> Result<u32>;
}

/// Sink that only writes notifications to the log
#[derive(Debug, Default)]
pub struct LogSink {
    delivered: u32,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> u32 {
        self.delivered
    }
}

impl NotificationSink for LogSink {
    fn deliver(&mut self, notification: &DesktopNotification) -> Result<u32> {
        self.delivered += 1;
        info!("[{}] {} | {} | icon {}",
            notification.app_name,
            notification.summary,
            notification.body.replace('\n', " / "),
            notification.icon);
        Ok(self.delivered)
    }
}
