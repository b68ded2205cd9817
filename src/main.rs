//! event-table - A terminal UI for a paginated table of events
//!
//! This is the main entry point for the event-table application.
//! It uses the Component Architecture pattern from ratatui.
//!
//! Usage:
//!   event-table                         # built-in sample events
//!   event-table --data events.csv       # load a JSON, YAML, or CSV file
//!   event-table --page-size 10 --save-config

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::record::EventRecord;
use crate::services::{data_source, ExportFormat};
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Browse, filter, and edit a paginated table of events.
#[derive(Debug, Parser)]
#[command(name = "event-table", version, about = "Paginated event table viewer")]
struct Args {
    /// Data file to load (.json, .yaml, .yml, or .csv).
    /// Defaults to the config file's data_path, then the built-in events.
    #[arg(short, long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Rows per table page.
    #[arg(short, long, value_name = "N")]
    page_size: Option<usize>,

    /// Directory exports are written to.
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Export document format.
    #[arg(long, value_enum)]
    export_format: Option<ExportFormat>,

    /// Log level or EnvFilter directive (EVENT_TABLE_LOG overrides it).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write the effective settings to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

impl Args {
    /// Layer command-line flags over the loaded config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(ref data) = self.data {
            config.data_path = Some(data.to_string_lossy().to_string());
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size.max(1);
        }
        if let Some(ref dir) = self.export_dir {
            config.export_dir = dir.to_string_lossy().to_string();
        }
        if let Some(format) = self.export_format {
            config.export_format = format;
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.apply(Config::load().unwrap_or_default());

    if args.save_config {
        let path = config.save()?;
        println!("Saved settings to {}", path.display());
        return Ok(());
    }

    // Logging is optional; the UI still runs without a log file
    if let Some(dir) = Config::config_dir() {
        if let Err(e) = logging::init(&dir, &args.log_level) {
            eprintln!("Warning: logging disabled: {:#}", e);
        }
    }

    let records = load_initial_records(&config)?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(records, config);

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        error!(error = %err, "application error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Records from the configured data file, or the built-in events
fn load_initial_records(config: &Config) -> Result<Vec<EventRecord>> {
    match config.data_path {
        Some(ref path) => {
            let records = data_source::load_records(path)
                .with_context(|| format!("Failed to load events from {}", path))?;
            info!(count = records.len(), source = %path, "loaded records");
            Ok(records)
        }
        None => {
            let records = data_source::seed_records();
            info!(count = records.len(), source = "built-in", "loaded records");
            Ok(records)
        }
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw failed");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "event-table",
            "--data",
            "events.csv",
            "--page-size",
            "0",
            "--export-format",
            "csv",
        ]);
        let config = args.apply(Config::default());

        assert_eq!(config.data_path.as_deref(), Some("events.csv"));
        assert_eq!(config.page_size, 1);
        assert_eq!(config.export_format, ExportFormat::Csv);
        assert_eq!(config.export_dir, Config::default().export_dir);
    }

    #[test]
    fn test_missing_flags_keep_config() {
        let args = Args::parse_from(["event-table"]);
        let config = Config {
            page_size: 8,
            ..Config::default()
        };
        assert_eq!(args.apply(config.clone()), config);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_initial_records_fall_back_to_built_in() {
        let records = load_initial_records(&Config::default()).unwrap();
        assert_eq!(records.len(), data_source::seed_records().len());
    }
}
