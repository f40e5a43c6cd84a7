//! Browse, favorites and playback flows driven through messages
//!
//! The runtime is stood in for by feeding fetch results back as messages.

use chrono::{TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use podtui::api::CatalogError;
use podtui::app::{App, Browse, Effect, Msg};
use podtui::{Episode, LastListened, Season, Show, ShowPreview};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn episode(number: u32, title: &str) -> Episode {
    Episode {
        number,
        title: title.into(),
        description: String::new(),
        file: format!("https://example.com/{}.mp3", title.to_lowercase()),
    }
}

fn full_show(id: &str, title: &str) -> Show {
    Show {
        id: id.into(),
        title: title.into(),
        description: "A show".into(),
        image: None,
        genres: vec![3],
        updated: None,
        seasons: vec![
            Season {
                number: 1,
                title: "Season 1".into(),
                image: None,
                episodes: vec![episode(1, "A"), episode(2, "B")],
            },
            Season {
                number: 2,
                title: "Season 2".into(),
                image: None,
                episodes: vec![episode(1, "C")],
            },
        ],
    }
}

fn loaded_app() -> App {
    let mut app = App::new();
    app.init();
    let listing: Vec<ShowPreview> = vec![
        full_show("1", "Alpha").preview(),
        full_show("2", "Beta").preview(),
    ];
    app.update(Msg::ShowsLoaded(Ok(listing)));
    app
}

/// Select a show and deliver its detail, returning the ticket used
fn open_show(app: &mut App, id: &str, title: &str) -> u64 {
    let effects = app.update(Msg::SelectShow(id.into()));
    let ticket = match effects.as_slice() {
        [Effect::FetchShow { id: requested, ticket }] => {
            assert_eq!(requested, id);
            *ticket
        }
        other => panic!("expected a single FetchShow, got {:?}", other),
    };
    app.update(Msg::ShowLoaded {
        ticket,
        result: Ok(full_show(id, title)),
    });
    ticket
}

// =============================================================================
// Browse Flow
// =============================================================================

#[test]
fn test_select_show_then_season_lists_episodes_in_order() {
    let mut app = loaded_app();
    open_show(&mut app, "1", "Alpha");
    assert!(matches!(app.browse, Browse::ShowDetail { .. }));
    assert!(!app.is_detail_pending());

    app.update(Msg::SelectSeason(0));
    let titles: Vec<&str> = app.current_episodes().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert_eq!(app.browse.season().map(|s| s.number), Some(1));
}

#[test]
fn test_back_walks_up_the_tree() {
    let mut app = loaded_app();
    open_show(&mut app, "1", "Alpha");
    app.update(Msg::SelectSeason(1));

    app.update(Msg::Back);
    assert!(matches!(app.browse, Browse::ShowDetail { .. }));
    app.update(Msg::Back);
    assert_eq!(app.browse, Browse::ShowList);
    app.update(Msg::Back);
    assert_eq!(app.browse, Browse::ShowList);
}

#[test]
fn test_unknown_season_keeps_current_view() {
    let mut app = loaded_app();
    open_show(&mut app, "1", "Alpha");
    app.update(Msg::SelectSeason(9));
    assert!(matches!(app.browse, Browse::ShowDetail { .. }));
}

#[test]
fn test_failed_detail_fetch_keeps_previous_view() {
    let mut app = loaded_app();
    let effects = app.update(Msg::SelectShow("1".into()));
    let Effect::FetchShow { ticket, .. } = effects[0].clone() else {
        panic!("expected FetchShow");
    };
    app.update(Msg::ShowLoaded {
        ticket,
        result: Err(CatalogError::NotFound),
    });
    assert_eq!(app.browse, Browse::ShowList);
    assert!(!app.detail_loading.is_loading());
}

#[test]
fn test_stale_detail_response_is_ignored() {
    let mut app = loaded_app();
    let first = app.update(Msg::SelectShow("1".into()));
    let second = app.update(Msg::SelectShow("2".into()));
    let (Effect::FetchShow { ticket: t1, .. }, Effect::FetchShow { ticket: t2, .. }) =
        (first[0].clone(), second[0].clone())
    else {
        panic!("expected FetchShow effects");
    };
    assert_ne!(t1, t2);

    app.update(Msg::ShowLoaded {
        ticket: t2,
        result: Ok(full_show("2", "Beta")),
    });
    // The slower, older response lands afterwards and must not win
    app.update(Msg::ShowLoaded {
        ticket: t1,
        result: Ok(full_show("1", "Alpha")),
    });

    assert_eq!(app.browse.show().map(|s| s.id.as_str()), Some("2"));
}

#[test]
fn test_keyboard_drill_down_and_play() {
    let mut app = loaded_app();
    let effects = app.handle_key(key(KeyCode::Enter));
    let Some(Effect::FetchShow { ticket, .. }) = effects.first().cloned() else {
        panic!("expected FetchShow");
    };
    app.update(Msg::ShowLoaded {
        ticket,
        result: Ok(full_show("1", "Alpha")),
    });

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.browse.season().map(|s| s.number), Some(1));

    app.handle_key(key(KeyCode::Down));
    let effects = app.handle_key(key(KeyCode::Enter));
    assert_eq!(
        effects,
        vec![
            Effect::Play {
                url: "https://example.com/b.mp3".into()
            },
            Effect::SaveLastListened(LastListened::new("1", 1, 2)),
        ]
    );
}

/// Season and episode numbers that repeat, as when the catalog leaves some out
fn show_with_repeated_numbers() -> Show {
    Show {
        id: "9".into(),
        title: "Gaps".into(),
        description: String::new(),
        image: None,
        genres: vec![],
        updated: None,
        seasons: vec![
            Season {
                number: 2,
                title: "First row".into(),
                image: None,
                episodes: vec![episode(2, "First"), episode(2, "Second")],
            },
            Season {
                number: 2,
                title: "Second row".into(),
                image: None,
                episodes: vec![episode(1, "Other"), episode(2, "Last")],
            },
        ],
    }
}

fn open_repeated(app: &mut App) {
    let effects = app.update(Msg::SelectShow("9".into()));
    let Some(Effect::FetchShow { ticket, .. }) = effects.first().cloned() else {
        panic!("expected FetchShow");
    };
    app.update(Msg::ShowLoaded {
        ticket,
        result: Ok(show_with_repeated_numbers()),
    });
}

#[test]
fn test_enter_plays_the_selected_row_when_numbers_repeat() {
    let mut app = App::new();
    open_repeated(&mut app);

    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Down));
    let effects = app.handle_key(key(KeyCode::Enter));

    assert_eq!(
        effects,
        vec![
            Effect::Play {
                url: "https://example.com/second.mp3".into()
            },
            Effect::SaveLastListened(LastListened::new("9", 2, 2)),
        ]
    );
    let playback = app.playback.as_ref().unwrap();
    assert_eq!(playback.episode.title, "Second");
    assert_eq!((playback.season_idx, playback.episode_idx), (0, 1));
}

#[test]
fn test_enter_opens_the_selected_season_row_when_numbers_repeat() {
    let mut app = App::new();
    open_repeated(&mut app);

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));

    let titles: Vec<&str> = app.current_episodes().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Other", "Last"]);
    assert_eq!(app.season_list.selected, 1);
    assert_eq!(app.browse.season().map(|s| s.title.as_str()), Some("Second row"));
}

// =============================================================================
// Playback
// =============================================================================

#[test]
fn test_new_episode_replaces_playback() {
    let mut app = loaded_app();
    open_show(&mut app, "1", "Alpha");
    app.update(Msg::SelectSeason(0));

    app.update(Msg::PlayEpisode {
        season_idx: 0,
        episode_idx: 0,
    });
    app.update(Msg::PlayEpisode {
        season_idx: 0,
        episode_idx: 1,
    });

    let playback = app.playback.as_ref().unwrap();
    assert_eq!(playback.episode.title, "B");
    assert_eq!(app.last_listened, Some(LastListened::new("1", 1, 2)));
}

#[test]
fn test_stop_and_finish_clear_playback() {
    let mut app = loaded_app();
    open_show(&mut app, "1", "Alpha");
    app.update(Msg::PlayEpisode {
        season_idx: 1,
        episode_idx: 0,
    });
    assert_eq!(app.update(Msg::Stop), vec![Effect::StopPlayback]);
    assert!(app.playback.is_none());
    assert!(app.update(Msg::Stop).is_empty());

    app.update(Msg::PlayEpisode {
        season_idx: 1,
        episode_idx: 0,
    });
    app.update(Msg::PlaybackFinished);
    assert!(app.playback.is_none());
}

#[test]
fn test_player_failure_shows_error() {
    let mut app = loaded_app();
    open_show(&mut app, "1", "Alpha");
    app.update(Msg::PlayEpisode {
        season_idx: 0,
        episode_idx: 0,
    });
    app.update(Msg::PlayerFailed("Player 'mpv' not found".into()));
    assert!(app.playback.is_none());
    assert!(app.error.as_deref().unwrap().contains("mpv"));
}

#[test]
fn test_missing_episode_is_ignored() {
    let mut app = loaded_app();
    open_show(&mut app, "1", "Alpha");
    let effects = app.update(Msg::PlayEpisode {
        season_idx: 0,
        episode_idx: 99,
    });
    assert!(effects.is_empty());
    assert!(app.playback.is_none());
}

#[test]
fn test_quit_stops_playback() {
    let mut app = loaded_app();
    open_show(&mut app, "1", "Alpha");
    app.update(Msg::PlayEpisode {
        season_idx: 0,
        episode_idx: 0,
    });
    assert_eq!(app.update(Msg::Quit), vec![Effect::StopPlayback]);
    assert!(!app.running);
}

// =============================================================================
// Favorites
// =============================================================================

#[test]
fn test_favorite_add_then_remove_leaves_empty() {
    let mut app = loaded_app();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    app.update(Msg::ToggleFavorite {
        show_id: "1".into(),
        at,
    });
    assert!(app.is_favorite("1"));
    assert_eq!(app.favorites.get("1").unwrap().added_at, at);

    app.update(Msg::ToggleFavorite {
        show_id: "1".into(),
        at,
    });
    assert!(app.favorites.is_empty());
}

#[test]
fn test_favorites_view_preserves_browse_state() {
    let mut app = loaded_app();
    open_show(&mut app, "1", "Alpha");
    app.update(Msg::SelectSeason(1));

    app.update(Msg::EnterFavorites);
    assert!(app.favorites_view);
    app.update(Msg::ExitFavorites);

    assert_eq!(app.browse.season().map(|s| s.number), Some(2));
}

#[test]
fn test_toggle_in_favorites_view_removes_item() {
    let mut app = loaded_app();
    app.update(Msg::ToggleFavorite {
        show_id: "2".into(),
        at: Utc::now(),
    });
    app.handle_key(key(KeyCode::Char('v')));
    assert_eq!(app.visible_favorites().len(), 1);

    app.handle_key(key(KeyCode::Char('f')));
    assert!(app.visible_favorites().is_empty());
    assert!(!app.is_favorite("2"));
}

#[test]
fn test_favorite_from_detail_view() {
    let mut app = App::new();
    open_show(&mut app, "7", "Only In Detail");
    app.handle_key(key(KeyCode::Char('f')));
    let fav = app.favorites.get("7").unwrap();
    assert_eq!(fav.show.title, "Only In Detail");
    assert_eq!(fav.show.season_count, 2);

    // Neither listed nor open any more; the favorite itself is the source
    app.update(Msg::Back);
    app.update(Msg::EnterFavorites);
    app.handle_key(key(KeyCode::Char('f')));
    assert!(app.favorites.is_empty());
}

#[test]
fn test_enter_in_favorites_opens_show() {
    let mut app = loaded_app();
    app.update(Msg::ToggleFavorite {
        show_id: "2".into(),
        at: Utc::now(),
    });
    app.update(Msg::EnterFavorites);

    let effects = app.handle_key(key(KeyCode::Enter));
    assert!(matches!(
        effects.as_slice(),
        [Effect::FetchShow { id, .. }] if id == "2"
    ));
    assert!(!app.favorites_view);
}

#[test]
fn test_favorite_filter_is_independent() {
    let mut app = loaded_app();
    for id in ["1", "2"] {
        app.update(Msg::ToggleFavorite {
            show_id: id.into(),
            at: Utc::now(),
        });
    }
    app.update(Msg::SetFavoriteFilterText("bet".into()));
    assert_eq!(app.visible_favorites().len(), 1);
    assert_eq!(app.visible_shows().len(), 2);
}

// =============================================================================
// Resume
// =============================================================================

#[test]
fn test_resume_opens_season_at_episode() {
    let mut app = loaded_app();
    let effects = app.update(Msg::ResumeLastListened(Some(LastListened::new("1", 1, 2))));
    let Some(Effect::FetchShow { ticket, .. }) = effects.first().cloned() else {
        panic!("expected FetchShow");
    };
    app.update(Msg::ShowLoaded {
        ticket,
        result: Ok(full_show("1", "Alpha")),
    });

    assert_eq!(app.browse.season().map(|s| s.number), Some(1));
    assert_eq!(app.episode_list.selected, 1);
    assert!(app.playback.is_none());
}
