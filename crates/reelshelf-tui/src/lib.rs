//! Library entry point for the reelshelf TUI.
//!
//! Provides a [`run`] function that launches the Ratatui terminal UI against
//! any [`MovieApi`] implementation. Network calls run on their own tasks and
//! report back over the event channel, so the screen stays interactive while
//! a request is pending.

mod app;
mod event;
mod ui;

use anyhow::anyhow;
use app::App;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::{AppEvent, Command};
use log::{debug, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use reelshelf_core::IdSource;
use reelshelf_protocol::MovieApi;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Configuration for a TUI session.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Collection endpoint shown in the header.
    pub endpoint: String,
    /// Interval between tick events.
    pub tick_rate: Duration,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            tick_rate: Duration::from_millis(250),
        }
    }
}

/// Launch the TUI.
///
/// The caller is responsible for initializing logging before calling `run`.
/// Log output should not go to the terminal while the UI owns it.
///
/// # Errors
/// Returns an error if terminal setup or the event loop fails. Request
/// failures are shown in the UI and never end the session.
pub async fn run(
    api: Arc<dyn MovieApi>,
    ids: Arc<dyn IdSource>,
    config: TuiConfig,
) -> anyhow::Result<()> {
    info!("starting TUI (endpoint={})", config.endpoint);
    let mut app = App::new(config.endpoint.clone(), ids);

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(256);
    spawn_input_handler(tx.clone());
    spawn_tick(tx.clone(), config.tick_rate);
    dispatch(Command::Reload, &api, &mut app, &tx);

    let result = loop {
        if let Err(err) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(err.into());
        }
        let Some(event) = rx.recv().await else {
            break Err(anyhow!("event channel closed unexpectedly"));
        };
        if let Some(command) = app.handle_event(event)
            && dispatch(command, &api, &mut app, &tx)
        {
            break Ok(());
        }
    };

    restore_terminal(&mut terminal)?;
    info!("TUI exited");
    result
}

/// Start work for `command`; returns true when the app should exit.
fn dispatch(
    command: Command,
    api: &Arc<dyn MovieApi>,
    app: &mut App,
    sender: &mpsc::Sender<AppEvent>,
) -> bool {
    if command == Command::Quit {
        return true;
    }
    app.started(&command);
    let api = api.clone();
    let sender = sender.clone();
    debug!("dispatching request (command={command:?})");
    tokio::spawn(async move {
        let event = match command {
            Command::Reload => AppEvent::Fetched(api.list().await),
            Command::Create(request) => AppEvent::Created(api.create(&request).await),
            Command::Update(movie) => {
                let result = api.update(&movie).await;
                AppEvent::Updated(movie.id, result)
            }
            Command::Delete(id) => {
                let result = api.delete(&id).await;
                AppEvent::Deleted(id, result)
            }
            Command::Quit => return,
        };
        let _ = sender.send(event).await;
    });
    false
}

/// Spawn a task to poll for input events.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        loop {
            if matches!(crossterm::event::poll(Duration::from_millis(30)), Ok(true)) {
                while matches!(crossterm::event::poll(Duration::from_millis(0)), Ok(true)) {
                    let event = match crossterm::event::read() {
                        Ok(event) => event,
                        Err(_) => break,
                    };
                    if let CrosstermEvent::Key(key) = event
                        && key.kind == KeyEventKind::Press
                        && sender.send(AppEvent::Input(key)).await.is_err()
                    {
                        return;
                    }
                }
            }
            tokio::task::yield_now().await;
        }
    });
}

/// Spawn a periodic tick event generator.
fn spawn_tick(sender: mpsc::Sender<AppEvent>, tick_rate: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if sender.send(AppEvent::Tick).await.is_err() {
                return;
            }
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
