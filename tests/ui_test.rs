//! UI rendering tests
//!
//! Renders full frames into a TestBackend and checks the visible text.

use chrono::{TimeZone, Utc};
use ratatui::{backend::TestBackend, Terminal};

use podtui::app::{App, Msg};
use podtui::ui;
use podtui::{Episode, Season, Show, ShowPreview};

fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

/// All cell symbols of the last frame, one string per row
fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(app: &App, width: u16, height: u16) -> String {
    let mut terminal = test_terminal(width, height);
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    screen(&terminal)
}

fn show() -> Show {
    Show {
        id: "1".into(),
        title: "Alpha Hour".into(),
        description: "Weekly talk about alphabets".into(),
        image: None,
        genres: vec![3],
        updated: Some(Utc.with_ymd_and_hms(2022, 11, 3, 7, 0, 0).unwrap()),
        seasons: vec![Season {
            number: 1,
            title: "Beginnings".into(),
            image: None,
            episodes: vec![
                Episode {
                    number: 1,
                    title: "Pilot".into(),
                    description: String::new(),
                    file: "https://example.com/1.mp3".into(),
                },
                Episode {
                    number: 2,
                    title: "Second Take".into(),
                    description: String::new(),
                    file: "https://example.com/2.mp3".into(),
                },
            ],
        }],
    }
}

fn loaded_app() -> App {
    let mut app = App::new();
    let listing: Vec<ShowPreview> = vec![show().preview()];
    app.update(Msg::ShowsLoaded(Ok(listing)));
    app
}

fn open_show(app: &mut App) {
    app.update(Msg::SelectShow("1".into()));
    app.update(Msg::ShowLoaded {
        ticket: 1,
        result: Ok(show()),
    });
}

// =============================================================================
// Views
// =============================================================================

#[test]
fn test_loading_screen() {
    let mut app = App::new();
    app.init();
    let text = draw(&app, 100, 20);
    assert!(text.contains("Loading shows"));
    assert!(text.contains("POD"));
}

#[test]
fn test_show_list_row() {
    let app = loaded_app();
    let text = draw(&app, 120, 24);
    assert!(text.contains("SHOWS (1)"));
    assert!(text.contains("Alpha Hour (1 Seasons)"));
    assert!(text.contains("Genres: History"));
    assert!(text.contains("November 3, 2022"));
}

#[test]
fn test_empty_filter_message() {
    let mut app = loaded_app();
    app.update(Msg::SetFilterText("zzz".into()));
    let text = draw(&app, 100, 20);
    assert!(text.contains("No shows match"));
    assert!(text.contains("zzz"));
}

#[test]
fn test_show_detail_lists_seasons() {
    let mut app = loaded_app();
    open_show(&mut app);
    let text = draw(&app, 120, 24);
    assert!(text.contains("Alpha Hour"));
    assert!(text.contains("Season 1: Beginnings"));
    assert!(text.contains("Episodes: 2"));
}

#[test]
fn test_season_detail_marks_playing_episode() {
    let mut app = loaded_app();
    open_show(&mut app);
    app.update(Msg::SelectSeason(0));
    app.update(Msg::PlayEpisode {
        season_idx: 0,
        episode_idx: 1,
    });

    let text = draw(&app, 120, 24);
    assert!(text.contains("1. Pilot"));
    assert!(text.contains("2. Second Take ♪"));
    assert!(text.contains("NOW PLAYING"));
    assert!(text.contains("S1E2"));
}

#[test]
fn test_favorites_view() {
    let mut app = loaded_app();
    app.update(Msg::EnterFavorites);
    let text = draw(&app, 100, 20);
    assert!(text.contains("No favorites yet"));

    app.update(Msg::ToggleFavorite {
        show_id: "1".into(),
        at: Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap(),
    });
    let text = draw(&app, 100, 20);
    assert!(text.contains("FAVORITE SHOWS (1)"));
    assert!(text.contains("Show: Alpha Hour"));
    assert!(text.contains("February 1, 2024"));
}

#[test]
fn test_error_popup() {
    let mut app = loaded_app();
    app.update(Msg::PlayerFailed("Player 'mpv' not found".into()));
    let text = draw(&app, 100, 20);
    assert!(text.contains("ERROR"));
    assert!(text.contains("Player 'mpv' not found"));
}

#[test]
fn test_renders_on_tiny_terminal() {
    let mut app = loaded_app();
    open_show(&mut app);
    app.update(Msg::SelectSeason(0));
    draw(&app, 20, 6);
}
