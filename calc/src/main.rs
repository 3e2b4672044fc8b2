//! A terminal calculator that sends its arithmetic to a server

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

use app::{App, EffectContext};
use calc_core::sync::Client;
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::{fs, io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    // The terminal belongs to the UI, so logs go to a file instead. Hold on
    // to the guard so buffered lines get flushed on exit.
    let _guard = init_logging(&config)?;

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, config).await;
    ratatui::restore();
    res
}

/// Set up `tracing` to write to `calc.log` in the data directory.
fn init_logging(config: &config::Config) -> io::Result<WorkerGuard> {
    let data_dir = config.data_dir();
    fs::create_dir_all(&data_dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&data_dir, "calc.log"));

    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, config: config::Config) -> io::Result<ExitCode> {
    let mut app = App::new(Client::new(config.server));
    let conn = Arc::new(EffectContext::new());

    // We expect side-effectful behaviors (that is, network access) to take
    // place via async tasks. Once those tasks are done, we read their results
    // off of a channel. We keep track of outstanding effects so we can exit
    // cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects = Vec::with_capacity(1);

    for effect in app.init() {
        outstanding_effects.push(spawn_effect_task(
            effect_tx.clone(),
            Arc::clone(&conn),
            effect,
        ));
    }
    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    // Start our event loop!
    loop {
        // Wait for either external input or the result of an effect. This is
        // an `Option<_>` because we don't need to pay attention to every
        // single piece of external input.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            effect_opt = effect_rx.recv() => {
                effect_opt.flatten()
            }
        };

        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&conn),
                    effect,
                ));
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        // This list should never be too long (there's at most one request to
        // the server in flight) so a full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                if let Err(err) = effect.await {
                    tracing::warn!(?err, "effect task failed during shutdown");
                }
            }

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<Option<app::Action>>,
    conn: Arc<EffectContext>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let next_action = effect.run(&conn).await;

        // If the channel is closed we're shutting down, and nobody is left to
        // care about the result.
        if effect_tx.send(next_action).is_err() {
            tracing::trace!("dropped effect result after shutdown");
        }
    })
}
