#![cfg(unix)]

use std::time::Duration;
use dbus::arg::{PropMap, RefArg, Variant};
use dbus::blocking::Connection;
use log::{debug, info};

use crate::error::Result;
use crate::notifier::{DesktopNotification, NotificationSink};

const NOTIFICATIONS_BUS: &str = "org.freedesktop.Notifications";
const NOTIFICATIONS_PATH: &str = "/org/freedesktop/Notifications";
const NOTIFICATIONS_INTERFACE: &str = "org.freedesktop.Notifications";

/// Sends notifications to the freedesktop notification server on the session bus
pub struct DbusNotificationSink {
    conn: Connection,
    timeout: Duration,
}

impl DbusNotificationSink {
    /// Connect to the session bus
    pub fn connect_session() -> Result<Self> {
        let conn = Connection::new_session()?;
        info!("Connected to D-Bus session bus");
        Ok(Self {
            conn,
            timeout: Duration::from_millis(5000),
        })
    }

    /// Name, vendor and version reported by the notification server
    pub fn server_information(&self) -> Result<(String, String, String, String)> {
        let proxy = self.conn.with_proxy(NOTIFICATIONS_BUS, NOTIFICATIONS_PATH, self.timeout);
        let info: (String, String, String, String) =
            proxy.method_call(NOTIFICATIONS_INTERFACE, "GetServerInformation", ())?;
        Ok(info)
    }
}

/// Convert string hints to the variant map expected by `Notify`
fn hint_map(notification: &DesktopNotification) -> PropMap {
    notification.hints
        .iter()
        .map(|(key, value)| (key.clone(), Variant(Box::new(value.clone()) as Box<dyn RefArg>)))
        .collect()
}

impl NotificationSink for DbusNotificationSink {
    fn deliver(&mut self, notification: &DesktopNotification) -> Result<u32> {
        let proxy = self.conn.with_proxy(NOTIFICATIONS_BUS, NOTIFICATIONS_PATH, self.timeout);
        let actions: Vec<String> = Vec::new();
        let icon = notification.icon.as_icon_string();

        let (id,): (u32,) = proxy.method_call(NOTIFICATIONS_INTERFACE, "Notify", (
            notification.app_name.as_str(),
            notification.replaces_id,
            icon.as_str(),
            notification.summary.as_str(),
            notification.body.as_str(),
            actions,
            hint_map(notification),
            notification.expire_timeout_ms,
        ))?;

        debug!("Notification server assigned id {}", id);
        Ok(id)
    }
}
