//! Summon playground - terminal session and frame loop.
//!
//! ```text
//! main() -> TerminalSession::new() -> LocalSet::run_until(run_app) -> App
//!                                                  |
//!                                 keys -> OverlayHost -> SelfHosted launcher
//! ```
//!
//! Launcher state is single-threaded (`Rc`), so the whole UI runs on a
//! current-thread runtime inside a `LocalSet`. Tasks awaiting dialog
//! outcomes are spawned with `spawn_local` and also drive delayed
//! resolutions.

mod app;
mod dialog;
mod input;

use std::fs::{self, OpenOptions};
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use summon_config::SummonConfig;

use crate::app::App;
use crate::input::InputPump;

const FRAME_DURATION: Duration = Duration::from_millis(16);

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: drop logs rather than write over the terminal UI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: next to the config file, normally ~/.summon/logs/summon.log
    if let Some(config_path) = SummonConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("summon.log"));
    }

    candidates.push(PathBuf::from(".summon").join("logs").join("summon.log"));

    candidates
}

/// Raw mode plus alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                Err(err.into())
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let config = match SummonConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            eprintln!("Ignoring config: {err}");
            SummonConfig::default()
        }
    };
    let options = config.launch_options();
    tracing::info!(
        singleton = options.singleton(),
        transition = options.transition().is_some(),
        "Starting playground"
    );

    let local = tokio::task::LocalSet::new();
    let result = local
        .run_until(async move {
            let mut session = TerminalSession::new()?;
            let mut app = App::new(options)?;
            run_app(&mut session.terminal, &mut app).await
        })
        .await;

    if let Err(err) = &result {
        tracing::error!("playground exited with error: {err:?}");
    }
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    let result: Result<()> = loop {
        frames.tick().await;

        let keys = match input.drain_keys() {
            Ok(keys) => keys,
            Err(e) => break Err(e),
        };
        for key in keys {
            app.handle_key(key);
        }
        if app.should_quit() {
            break Ok(());
        }

        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
