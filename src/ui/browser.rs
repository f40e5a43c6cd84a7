//! Show list view
//!
//! The filtered, sorted catalog. Each row is two lines: title with season
//! count, then genres and last-updated date.

use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
};

use crate::app::App;
use crate::models::{self, ShowPreview};
use crate::ui::{self, Theme};

const ROW_HEIGHT: usize = 2;

pub fn render_show_list(frame: &mut Frame, area: Rect, app: &App) {
    let shows = app.visible_shows();
    let block = ui::panel(format!(" SHOWS ({}) ", shows.len()), true);

    if app.shows_loading.is_loading() {
        let msg = app.shows_loading.message().unwrap_or("Loading...");
        ui::render_message(frame, area, block, &format!("⟳ {}", msg), Theme::loading());
        return;
    }

    if shows.is_empty() {
        let msg = if app.shows.is_empty() {
            "No shows available. Press r to reload."
        } else {
            "No shows match the current filter"
        };
        ui::render_message(frame, area, block, msg, Theme::dimmed());
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_rows = (inner.height as usize / ROW_HEIGHT).max(1);
    let offset = app.show_list.visible_offset(visible_rows);

    let items: Vec<ListItem> = shows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(i, show)| show_item(show, i == app.show_list.selected, app.is_favorite(&show.id)))
        .collect();

    frame.render_widget(List::new(items), inner);
}

/// Two-line row for one show
pub fn show_item(show: &ShowPreview, selected: bool, favorite: bool) -> ListItem<'static> {
    let mut title_line = vec![
        ui::marker(selected),
        Span::styled(
            show.title.clone(),
            if selected {
                Theme::highlighted()
            } else {
                Theme::text()
            },
        ),
        Span::styled(format!(" ({} Seasons)", show.season_count), Theme::dimmed()),
    ];
    if favorite {
        title_line.push(Span::styled(" ♥", Theme::favorite()));
    }

    let genres = if show.genres.is_empty() {
        "none".to_string()
    } else {
        show.genre_labels()
    };
    let meta_line = vec![
        Span::raw("    "),
        Span::styled(format!("Genres: {}", genres), Theme::genre()),
        Span::styled("  Last Updated: ", Theme::dimmed()),
        Span::styled(models::format_date(show.updated), Theme::date()),
    ];

    ListItem::new(vec![Line::from(title_line), Line::from(meta_line)])
}
