use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use clap::Parser;
use log::{debug, error, info, warn};

use mpdnotify::config::NotifierConfig;
use mpdnotify::error::{NotifierError, Result};
use mpdnotify::notifier::{LogSink, NotificationSink, NowPlayingNotifier};
use mpdnotify::players::{MpdEventSource, MpdStatusQuery};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,

    /// Log notifications instead of showing them on the desktop
    #[clap(long)]
    dry_run: bool,

    /// Print the effective configuration as JSON and exit
    #[clap(long)]
    dump_config: bool,
}

fn main() {
    let args = Args::parse();

    let (mut config, source) = match NotifierConfig::load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("mpdnotify: {}", e);
            process::exit(1);
        }
    };

    if args.verbose {
        config.logging.level = "debug".to_string();
    }

    if args.dump_config {
        for warning in config.apply_env() {
            eprintln!("mpdnotify: {}", warning);
        }
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("mpdnotify: failed to serialize configuration: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = config.logging.initialize_logger() {
        eprintln!("mpdnotify: {}", e);
        process::exit(1);
    }

    info!("Using configuration from {}", source);
    for warning in config.apply_env() {
        warn!("{}", warning);
    }

    if let Err(e) = run(config, args.dry_run) {
        error!("{}", e);
        process::exit(1);
    }
    info!("Exiting application");
}

fn run(config: NotifierConfig, dry_run: bool) -> Result<()> {
    info!("mpdnotify {} starting", env!("CARGO_PKG_VERSION"));
    let address = config.mpd_address();

    // Setup failures are fatal
    let events = MpdEventSource::connect(&address)?;
    let query = MpdStatusQuery::new(&address);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down...");
        r.store(false, Ordering::SeqCst);
    }).map_err(|e| NotifierError::Config(format!("Error setting Ctrl+C handler: {}", e)))?;

    let listener = if dry_run {
        info!("Dry run: notifications are only logged");
        spawn_listener(config, events, query, LogSink::new(), running.clone())
    } else {
        start_desktop_listener(config, events, query, running.clone())?
    };

    // The listener blocks in MPD idle, so the main thread only watches for shutdown
    while running.load(Ordering::SeqCst) && !listener.is_finished() {
        thread::sleep(Duration::from_millis(100));
    }

    if listener.is_finished() {
        return match listener.join() {
            Ok(result) => result,
            Err(_) => Err(NotifierError::Config("event listener thread panicked".to_string())),
        };
    }
    Ok(())
}

/// Run the notification loop on a background thread
fn spawn_listener<S>(
    config: NotifierConfig,
    mut events: MpdEventSource,
    query: MpdStatusQuery,
    sink: S,
    running: Arc<AtomicBool>,
) -> JoinHandle<Result<()>>
where
    S: NotificationSink + Send + 'static,
{
    thread::spawn(move || {
        info!("Listening for MPD events on {}", events.address());
        let mut notifier = NowPlayingNotifier::new(&config, query, sink);
        let result = notifier.run(&mut events, &running);
        info!("MPD event listener thread shutting down");
        result
    })
}

#[cfg(unix)]
fn start_desktop_listener(
    config: NotifierConfig,
    events: MpdEventSource,
    query: MpdStatusQuery,
    running: Arc<AtomicBool>,
) -> Result<JoinHandle<Result<()>>> {
    use mpdnotify::helpers::desktop_notify::DbusNotificationSink;

    let sink = DbusNotificationSink::connect_session()?;
    match sink.server_information() {
        Ok((name, vendor, version, spec_version)) => {
            debug!("Notification server: {} {} by {} (protocol {})", name, version, vendor, spec_version)
        }
        Err(e) => warn!("Could not query notification server: {}", e),
    }
    Ok(spawn_listener(config, events, query, sink, running))
}

#[cfg(not(unix))]
fn start_desktop_listener(
    config: NotifierConfig,
    events: MpdEventSource,
    query: MpdStatusQuery,
    running: Arc<AtomicBool>,
) -> Result<JoinHandle<Result<()>>> {
    warn!("Desktop notifications are not supported on this platform, logging them instead");
    Ok(spawn_listener(config, events, query, LogSink::new(), running))
}
