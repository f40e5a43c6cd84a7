//! CLI - Command Line Interface for podtui
//!
//! Every browse action is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Browse the catalog
//! podtui shows --search history --sort date-desc --json
//! podtui shows --genre Comedy
//!
//! # Drill into a show
//! podtui show 10716
//! podtui episodes 10716 --season 2
//!
//! # Listen
//! podtui play 10716 --season 2 --episode 3
//! podtui last
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::CatalogError;
use crate::genres;
use crate::transform::SortMode;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Show, season or episode not found
    NotFound = 4,
    /// Player could not be started
    PlayerFailed = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<&CatalogError> for ExitCode {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::NotFound => ExitCode::NotFound,
            CatalogError::Request(_) | CatalogError::Status(_) => ExitCode::NetworkError,
            CatalogError::InvalidResponse(_) => ExitCode::Error,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// podtui - Terminal podcast browser
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for automation.
#[derive(Parser, Debug)]
#[command(
    name = "podtui",
    version,
    about = "Terminal podcast browser with favorites and audio playback",
    long_about = "Browse a podcast catalog, drill into shows and seasons, \
                  keep favorites and listen through mpv or VLC.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  podtui                                  Launch interactive TUI\n\
                  podtui shows --search crime             Filter shows by title\n\
                  podtui episodes 10716 -s 1              List a season's episodes\n\
                  podtui play 10716 -s 1 -e 2             Play an episode"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List shows, filtered and sorted
    #[command(visible_alias = "ls")]
    Shows(ShowsCmd),

    /// Show details and seasons for one show
    #[command(visible_alias = "i")]
    Show(ShowCmd),

    /// List a season's episodes
    #[command(visible_alias = "ep")]
    Episodes(EpisodesCmd),

    /// Play an episode and wait for the player to exit
    Play(PlayCmd),

    /// Print the last listened episode
    Last,

    /// List known genres
    Genres,
}

// =============================================================================
// Shows Command
// =============================================================================

/// List the catalog
#[derive(Args, Debug)]
pub struct ShowsCmd {
    /// Case-insensitive title substring
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Genre id or title (e.g. 3 or "Comedy")
    #[arg(long, short = 'g')]
    pub genre: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value = "title")]
    pub sort: SortArg,

    /// Maximum number of results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

impl ShowsCmd {
    /// Resolve `--genre` into an id. Accepts an id or a title.
    pub fn genre_id(&self) -> Result<Option<u32>, String> {
        let Some(raw) = self.genre.as_deref() else {
            return Ok(None);
        };
        if let Ok(id) = raw.trim().parse::<u32>() {
            return Ok(Some(id));
        }
        genres::genre_id(raw)
            .map(Some)
            .ok_or_else(|| format!("Unknown genre: {}", raw))
    }
}

/// Sort order argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortArg {
    /// Title A-Z
    #[default]
    Title,
    /// Title Z-A
    TitleDesc,
    /// Oldest updated first
    DateAsc,
    /// Newest updated first
    DateDesc,
    /// Catalog order
    #[value(name = "none")]
    Unsorted,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => SortMode::Title,
            SortArg::TitleDesc => SortMode::TitleDesc,
            SortArg::DateAsc => SortMode::DateAsc,
            SortArg::DateDesc => SortMode::DateDesc,
            SortArg::Unsorted => SortMode::Unsorted,
        }
    }
}

// =============================================================================
// Show / Episodes / Play Commands
// =============================================================================

/// Get one show
#[derive(Args, Debug)]
pub struct ShowCmd {
    /// Show id
    #[arg(required = true)]
    pub id: String,
}

/// List episodes of a season
#[derive(Args, Debug)]
pub struct EpisodesCmd {
    /// Show id
    #[arg(required = true)]
    pub id: String,

    /// Season number
    #[arg(long, short = 's', default_value = "1")]
    pub season: u32,
}

/// Play one episode
#[derive(Args, Debug)]
pub struct PlayCmd {
    /// Show id
    #[arg(required = true)]
    pub id: String,

    /// Season number
    #[arg(long, short = 's', default_value = "1")]
    pub season: u32,

    /// Episode number
    #[arg(long, short = 'e', default_value = "1")]
    pub episode: u32,

    /// Player override (mpv, vlc)
    #[arg(long, short = 'p')]
    pub player: Option<String>,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Play result
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayResponse {
    pub status: String,
    pub player: String,
    pub show: String,
    pub season: u32,
    pub episode: u32,
    pub title: String,
    pub url: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data wrapped in the JSON envelope
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print a plain line (human mode)
    pub fn line(&self, msg: impl std::fmt::Display) {
        println!("{}", msg);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
