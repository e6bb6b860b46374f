use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use log::{debug, info, warn};

use crate::config::NotifierConfig;
use crate::data::{IconArtifact, NotificationContent};
use crate::error::Result;
use crate::helpers::icon_resolver::IconResolver;
use crate::notifier::change_filter::ChangeFilter;
use crate::notifier::formatter::format_notification;
use crate::notifier::sink::{DesktopNotification, NotificationSink};
use crate::players::{EventSource, StatusQuery, PLAYER_EVENT};

/// What happened to a single event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not a player event
    Ignored,
    /// Same summary and body as the last notification
    Unchanged(NotificationContent),
    /// Notification shown, with the id assigned by the server
    Delivered { content: NotificationContent, icon: IconArtifact, id: u32 },
    /// The sink rejected the notification
    DeliveryFailed(NotificationContent),
}

/// Turns player events into desktop notifications.
///
/// Owns the last delivered notification; events are processed one at a time.
pub struct NowPlayingNotifier<Q, S> {
    query: Q,
    sink: S,
    icons: IconResolver,
    filter: ChangeFilter,
    config: NotifierConfig,
    last_id: u32,
    reconnect_delay: Duration,
}

impl<Q: StatusQuery, S: NotificationSink> NowPlayingNotifier<Q, S> {
    pub fn new(config: &NotifierConfig, query: Q, sink: S) -> Self {
        Self {
            query,
            sink,
            icons: IconResolver::from_config(config),
            filter: ChangeFilter::new(),
            config: config.clone(),
            last_id: 0,
            reconnect_delay: Duration::from_secs(5),
        }
    }

    pub fn with_icon_resolver(mut self, icons: IconResolver) -> Self {
        self.icons = icons;
        self
    }

    /// Start from a known previously delivered notification
    pub fn with_change_filter(mut self, filter: ChangeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Pause between attempts to re-establish a broken event source
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn change_filter(&self) -> &ChangeFilter {
        &self.filter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Process one subsystem event.
    ///
    /// Query failures are returned to the caller; delivery failures are logged and
    /// reported as [`EventOutcome::DeliveryFailed`].
    pub fn handle_event(&mut self, event: &str) -> Result<EventOutcome> {
        if event != PLAYER_EVENT {
            debug!("Ignoring {} event", event);
            return Ok(EventOutcome::Ignored);
        }

        let status = self.query.status()?;
        let song = self.query.current_song()?;
        debug!("Player event: {}, song: {}", status, song);

        let content = format_notification(&status, &song);
        let icon = self.icons.resolve(song.file());

        if !self.filter.accept(&content) {
            debug!("Notification unchanged, not sending: {}", content);
            return Ok(EventOutcome::Unchanged(content));
        }

        let replaces_id = if self.config.replace_previous { self.last_id } else { 0 };
        let notification = DesktopNotification::new(&self.config, &content, icon.clone(), replaces_id);

        match self.sink.deliver(&notification) {
            Ok(id) => {
                info!("Sent notification {}: {}", id, content);
                if self.config.replace_previous {
                    self.last_id = id;
                }
                Ok(EventOutcome::Delivered { content, icon, id })
            }
            Err(e) => {
                warn!("Error sending notification: {}", e);
                Ok(EventOutcome::DeliveryFailed(content))
            }
        }
    }

    /// Consume events until the stream ends or `running` is cleared.
    ///
    /// Events that fail to process are skipped. A broken event source is retried
    /// after the reconnect delay.
    pub fn run<E: EventSource>(&mut self, events: &mut E, running: &AtomicBool) -> Result<()> {
        while running.load(Ordering::SeqCst) {
            match events.next_event() {
                Ok(Some(event)) => {
                    if let Err(e) = self.handle_event(&event) {
                        warn!("Skipping {} event: {}", event, e);
                    }
                }
                Ok(None) => {
                    info!("Event stream closed");
                    return Ok(());
                }
                Err(e) => {
                    warn!("Event source failed: {}", e);
                    self.wait_for_reconnect(running);
                }
            }
        }
        debug!("Event loop stopped");
        Ok(())
    }

    /// Sleep for the reconnect delay in short steps so shutdown is not held up
    fn wait_for_reconnect(&self, running: &AtomicBool) {
        if self.reconnect_delay.is_zero() {
            return;
        }
        info!("Will attempt to reconnect in {} seconds", self.reconnect_delay.as_secs());
        let step = Duration::from_millis(100);
        let mut waited = Duration::ZERO;
        while waited < self.reconnect_delay && running.load(Ordering::SeqCst) {
            thread::sleep(step);
            waited += step;
        }
    }
}
