/// Notification pipeline: formatting, change filtering and delivery
pub mod change_filter;
pub mod formatter;
mod now_playing;
mod sink;

pub use change_filter::ChangeFilter;
pub use formatter::format_notification;
pub use now_playing::{EventOutcome, NowPlayingNotifier};
pub use sink::{DesktopNotification, LogSink, NotificationSink};
