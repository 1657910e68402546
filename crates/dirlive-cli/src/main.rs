//! dirlive — prints a directory listing and keeps it live.
//!
//! Shows the directory given on the command line (or the current one),
//! reprints it whenever the controller applies a new snapshot, and reads
//! simple commands from stdin until `quit` or end of input.

mod input;
mod render;

use std::path::PathBuf;

use dirlive_core::{Config, CoreError, Event, RefreshController, RefreshRegistry, ScanRequest};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::input::{Input, HELP};
use crate::render::render_event;

/// One turn of the main loop.
enum Step {
    Processed,
    Event(Event),
    Line(std::io::Result<Option<String>>),
}

/// Returns the path to the config file (~/.config/dirlive/config.toml).
fn config_path() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("dirlive")
        .join("config.toml")
}

/// Loads the config, falling back to defaults when the file is absent.
fn load_config() -> Config {
    let path = config_path();
    match Config::load(&path) {
        Ok(config) => config,
        Err(CoreError::NotFound(_)) => Config::default(),
        Err(e) => {
            tracing::warn!("ignoring {}: {e}", path.display());
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to a file so stdout stays a clean listing.
    tracing_subscriber::fmt()
        .with_writer(|| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open("/tmp/dirlive.log")
                .expect("failed to open log file")
        })
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let start_dir = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => std::env::current_dir()?,
    };

    let config = load_config();
    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<Event>();
    let mut controller = RefreshController::new(
        ScanRequest::new(&start_dir),
        &config,
        RefreshRegistry::global(),
        events_tx,
    );
    controller.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let step = tokio::select! {
            _ = controller.process_next() => Step::Processed,
            Some(event) = events_rx.recv() => Step::Event(event),
            line = lines.next_line() => Step::Line(line),
        };

        match step {
            Step::Processed => {}
            Step::Event(event) => {
                if let Some(text) = render_event(&event, controller.preselected_filename()) {
                    println!("{text}");
                }
            }
            Step::Line(line) => {
                let Some(line) = line? else {
                    break;
                };
                match input::parse(&line, controller.path(), controller.settings()) {
                    Ok(None) => {}
                    Ok(Some(Input::Core(command))) => controller.execute(command),
                    Ok(Some(Input::Notify(path))) => {
                        let notified = RefreshRegistry::global().request_refresh(&path);
                        println!("refresh requested for {} ({notified} listening)", path.display());
                    }
                    Ok(Some(Input::Help)) => println!("{HELP}"),
                    Ok(Some(Input::Quit)) => break,
                    Err(e) => eprintln!("{e}"),
                }
            }
        }
    }

    controller.teardown();
    Ok(())
}
