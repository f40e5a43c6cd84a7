//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the catalog, the store and the
//! player. Each handler takes CLI args, config and Output, returns ExitCode.

use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{EpisodesCmd, ExitCode, Output, PlayCmd, PlayResponse, ShowCmd, ShowsCmd};
use crate::config::Config;
use crate::genres;
use crate::models::{self, LastListened, Season, Show};
use crate::stream::{AudioPlayer, PlayerType};
use crate::transform::{self, ShowFilter};

// =============================================================================
// Shows Command
// =============================================================================

pub async fn shows_cmd(cmd: ShowsCmd, config: &Config, output: &Output) -> ExitCode {
    let genre = match cmd.genre_id() {
        Ok(genre) => genre,
        Err(msg) => return output.error(msg, ExitCode::InvalidArgs),
    };
    let filter = ShowFilter {
        text: cmd.search.clone().unwrap_or_default(),
        genre,
    };

    output.info("Fetching shows...");

    let shows = match config.catalog_client().shows().await {
        Ok(shows) => shows,
        Err(e) => {
            let code = ExitCode::from(&e);
            return output.error(format!("Failed to fetch shows: {}", e), code);
        }
    };

    let mut visible = transform::transform_shows(&shows, &filter, cmd.sort.into());
    if let Some(limit) = cmd.limit {
        visible.truncate(limit);
    }

    if output.json {
        return emit(output, &visible);
    }
    for show in &visible {
        output.line(format!(
            "{:>8}  {}  [{}]  {}",
            show.id,
            show,
            show.genre_labels(),
            models::format_date(show.updated)
        ));
    }
    output.info(format!("{} of {} shows", visible.len(), shows.len()));
    ExitCode::Success
}

// =============================================================================
// Show Command
// =============================================================================

pub async fn show_cmd(cmd: ShowCmd, config: &Config, output: &Output) -> ExitCode {
    let show = match fetch_show(&cmd.id, config, output).await {
        Ok(show) => show,
        Err(code) => return code,
    };

    if output.json {
        return emit(output, &show);
    }
    output.line(&show.title);
    output.line(format!(
        "Genres: {}",
        genres::labels(&show.genres).join(", ")
    ));
    output.line(format!("Last Updated: {}", models::format_date(show.updated)));
    if !show.description.is_empty() {
        output.line("");
        output.line(&show.description);
    }
    output.line("");
    for season in &show.seasons {
        output.line(format!("{}  (Episodes: {})", season, season.episodes.len()));
    }
    ExitCode::Success
}

// =============================================================================
// Episodes Command
// =============================================================================

pub async fn episodes_cmd(cmd: EpisodesCmd, config: &Config, output: &Output) -> ExitCode {
    let show = match fetch_show(&cmd.id, config, output).await {
        Ok(show) => show,
        Err(code) => return code,
    };
    let season = match find_season(&show, cmd.season, output) {
        Ok(season) => season,
        Err(code) => return code,
    };

    if output.json {
        return emit(output, season);
    }
    output.line(format!("{} - {}", show.title, season));
    for episode in &season.episodes {
        output.line(format!("  {}", episode));
    }
    ExitCode::Success
}

// =============================================================================
// Play Command
// =============================================================================

pub async fn play_cmd(cmd: PlayCmd, config: &Config, output: &Output) -> ExitCode {
    let player_type = match cmd.player.as_deref() {
        Some(name) => match name.parse::<PlayerType>() {
            Ok(p) => p,
            Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
        },
        None => match config.player_type() {
            Ok(p) => p,
            Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
        },
    };

    let show = match fetch_show(&cmd.id, config, output).await {
        Ok(show) => show,
        Err(code) => return code,
    };
    let season = match find_season(&show, cmd.season, output) {
        Ok(season) => season,
        Err(code) => return code,
    };
    let Some(episode) = season.episode(cmd.episode) else {
        return output.error(
            format!("Episode {} not found in season {}", cmd.episode, cmd.season),
            ExitCode::NotFound,
        );
    };
    if episode.file.is_empty() {
        return output.error("Episode has no audio source", ExitCode::NotFound);
    }

    remember(config, LastListened::new(&show.id, season.number, episode.number));

    output.info(format!(
        "Playing {} S{}E{} \"{}\" with {}",
        show.title,
        season.number,
        episode.number,
        episode.title,
        player_type.display_name()
    ));

    let mut player = AudioPlayer::new(player_type).with_args(config.player_args.clone());
    if let Err(e) = player.play_and_wait(&episode.file).await {
        return output.error(format!("Player failed: {}", e), ExitCode::PlayerFailed);
    }

    if output.json {
        return emit(
            output,
            PlayResponse {
                status: "finished".into(),
                player: player_type.display_name().into(),
                show: show.title.clone(),
                season: season.number,
                episode: episode.number,
                title: episode.title.clone(),
                url: episode.file.clone(),
            },
        );
    }
    ExitCode::Success
}

// =============================================================================
// Last / Genres Commands
// =============================================================================

pub async fn last_cmd(config: &Config, output: &Output) -> ExitCode {
    let store = match config.store() {
        Ok(store) => store,
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    };
    match store.last_listened() {
        Ok(Some(last)) => {
            if output.json {
                return emit(output, &last);
            }
            output.line(last);
            ExitCode::Success
        }
        Ok(None) => output.error("Nothing listened yet", ExitCode::NotFound),
        Err(e) => output.error(format!("Failed to read storage: {}", e), ExitCode::Error),
    }
}

#[derive(Serialize)]
struct GenreEntry {
    id: u32,
    title: &'static str,
}

pub async fn genres_cmd(output: &Output) -> ExitCode {
    let all: Vec<GenreEntry> = genres::all()
        .map(|(id, title)| GenreEntry { id, title })
        .collect();

    if output.json {
        return emit(output, &all);
    }
    for genre in &all {
        output.line(format!("{:>3}  {}", genre.id, genre.title));
    }
    ExitCode::Success
}

// =============================================================================
// Helpers
// =============================================================================

async fn fetch_show(id: &str, config: &Config, output: &Output) -> Result<Show, ExitCode> {
    output.info(format!("Fetching show {}...", id));
    config.catalog_client().show(id).await.map_err(|e| {
        let code = ExitCode::from(&e);
        output.error(format!("Failed to fetch show {}: {}", id, e), code)
    })
}

fn find_season<'a>(show: &'a Show, number: u32, output: &Output) -> Result<&'a Season, ExitCode> {
    show.season(number).ok_or_else(|| {
        output.error(
            format!("Season {} not found in {}", number, show.title),
            ExitCode::NotFound,
        )
    })
}

fn emit<T: Serialize>(output: &Output, data: T) -> ExitCode {
    match output.print(data) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

/// Persisting the pointer is best-effort; playback goes ahead regardless
fn remember(config: &Config, last: LastListened) {
    match config.store().and_then(|store| store.save_last_listened(&last)) {
        Ok(()) => info!(%last, "saved last listened"),
        Err(e) => warn!(error = %e, "could not save last listened"),
    }
}
