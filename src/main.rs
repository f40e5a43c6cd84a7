//! podtui - Terminal podcast browser
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! podtui
//!
//! # CLI mode (for automation)
//! podtui shows --genre History --sort date-desc
//! podtui play 10716 --season 1 --episode 2
//! podtui last --json
//! ```

use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use podtui::api::CatalogClient;
use podtui::app::{App, Effect, Msg};
use podtui::cli::{Cli, Command, ExitCode, Output};
use podtui::commands;
use podtui::config::Config;
use podtui::store::LocalStore;
use podtui::stream::AudioPlayer;
use podtui::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        let config = Config::resolve(cli.config.as_deref())?;
        init_logging(&config);
        run_tui(config).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
    };
    init_logging(&config);

    match cli.command {
        Some(Command::Shows(cmd)) => commands::shows_cmd(cmd, &config, &output).await,
        Some(Command::Show(cmd)) => commands::show_cmd(cmd, &config, &output).await,
        Some(Command::Episodes(cmd)) => commands::episodes_cmd(cmd, &config, &output).await,
        Some(Command::Play(cmd)) => commands::play_cmd(cmd, &config, &output).await,
        Some(Command::Last) => commands::last_cmd(&config, &output).await,
        Some(Command::Genres) => commands::genres_cmd(&output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// Logging
// =============================================================================

fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("podtui").join("podtui.log"))
}

/// Log to a file so the TUI stays clean. RUST_LOG wins over the config.
fn init_logging(config: &Config) {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(log_file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    else {
        return;
    };

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        config
            .log_level
            .clone()
            .unwrap_or_else(|| "info,hyper_util=warn,reqwest=warn".to_string())
    });
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    info!(log = %path.display(), "podtui starting");
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: Config) -> Result<()> {
    let player = config.audio_player().context("Invalid player in config")?;
    let store = match config.store() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, "last listened will not be saved");
            None
        }
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let mut runtime = Runtime {
        client: config.catalog_client(),
        store,
        player,
        tx,
    };
    let mut app = App::new().with_sorts(config.sort(), config.favorite_sort());
    app.last_listened = runtime
        .store
        .as_ref()
        .and_then(|store| store.last_listened().ok().flatten());

    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, &mut runtime, rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;
    runtime.player.stop().await;

    result
}

/// Main event loop - handles input, applies messages, runs effects, renders
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    runtime: &mut Runtime,
    mut rx: UnboundedReceiver<Msg>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let effects = app.init();
    runtime.run_all(app, effects).await;

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    let effects = app.handle_key(key);
                    runtime.run_all(app, effects).await;
                }
            }
        }

        // Completed fetches
        while let Ok(msg) = rx.try_recv() {
            let effects = app.update(msg);
            runtime.run_all(app, effects).await;
        }

        if app.playback.is_some() && !runtime.player.is_playing() {
            let effects = app.update(Msg::PlaybackFinished);
            runtime.run_all(app, effects).await;
        }
    }

    Ok(())
}

// =============================================================================
// Effect Runtime
// =============================================================================

/// Executes effects. Network work is spawned and reports back through `tx`;
/// player and storage work is done inline.
struct Runtime {
    client: CatalogClient,
    store: Option<LocalStore>,
    player: AudioPlayer,
    tx: UnboundedSender<Msg>,
}

impl Runtime {
    /// Run effects, feeding any immediate result back into the app
    async fn run_all(&mut self, app: &mut App, effects: Vec<Effect>) {
        let mut queue = effects;
        while !queue.is_empty() {
            let mut next = Vec::new();
            for effect in queue {
                if let Some(msg) = self.run(effect).await {
                    next.extend(app.update(msg));
                }
            }
            queue = next;
        }
    }

    async fn run(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::FetchShows => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.shows().await;
                    let _ = tx.send(Msg::ShowsLoaded(result));
                });
                None
            }
            Effect::FetchShow { id, ticket } => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.show(&id).await;
                    let _ = tx.send(Msg::ShowLoaded { ticket, result });
                });
                None
            }
            Effect::Play { url } => match self.player.play(&url).await {
                Ok(()) => None,
                Err(e) => {
                    error!(error = %e, "failed to start player");
                    Some(Msg::PlayerFailed(e.to_string()))
                }
            },
            Effect::StopPlayback => {
                self.player.stop().await;
                None
            }
            Effect::SaveLastListened(last) => {
                if let Some(store) = &self.store {
                    match store.save_last_listened(&last) {
                        Ok(()) => debug!(%last, "saved last listened"),
                        Err(e) => warn!(error = %e, "could not save last listened"),
                    }
                }
                None
            }
            Effect::LoadLastListened => {
                let last = match &self.store {
                    Some(store) => store.last_listened().unwrap_or_else(|e| {
                        warn!(error = %e, "could not read last listened");
                        None
                    }),
                    None => None,
                };
                Some(Msg::ResumeLastListened(last))
            }
        }
    }
}
