//! Terminal UI components
//!
//! Built with ratatui. Every view reads from [`App`] and draws; none of
//! them mutate state.

pub mod browser;
pub mod detail;
pub mod favorites;
pub mod player;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Browse, InputMode};
use crate::genres;

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let now_playing_height = if app.playback.is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                  // Header
            Constraint::Min(1),                     // Content
            Constraint::Length(now_playing_height), // Now playing
            Constraint::Length(1),                  // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    if let Some(playback) = &app.playback {
        player::render_now_playing(frame, chunks[2], playback);
    }
    render_status_bar(frame, chunks[3], app);

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// Logo plus the filter box of the active list
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "POD",
            Style::default()
                .fg(Theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "TUI",
            Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let query = app.active_query();

    let mut spans = vec![if editing {
        Span::styled(format!("⌕ {}│", query.filter.text), Theme::input().fg(Theme::PRIMARY))
    } else if query.filter.text.is_empty() {
        Span::styled("⌕ / to search", Theme::dimmed())
    } else {
        Span::styled(format!("⌕ {}", query.filter.text), Theme::input())
    }];
    spans.push(Span::styled("  Genre: ", Theme::dimmed()));
    spans.push(Span::styled(
        query
            .filter
            .genre
            .map(genres::genre_title)
            .unwrap_or("All Genres"),
        Theme::text(),
    ));
    spans.push(Span::styled("  Sort: ", Theme::dimmed()));
    spans.push(Span::styled(query.sort.label(), Theme::text()));

    let title = if app.favorites_view {
        " FAVORITES "
    } else {
        " SHOWS "
    };
    let search_box = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if editing {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(title, Theme::title())),
    );
    frame.render_widget(search_box, header_chunks[1]);
}

/// Favorites replace the browse tree entirely while shown
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    if app.favorites_view {
        favorites::render_favorites(frame, area, app);
        return;
    }
    match &app.browse {
        Browse::ShowList => browser::render_show_list(frame, area, app),
        Browse::ShowDetail { show } => detail::render_show_detail(frame, area, app, show),
        Browse::SeasonDetail { show, season_idx } => {
            detail::render_season_detail(frame, area, app, show, *season_idx)
        }
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " SEARCH ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
        ),
    };

    let view = if app.favorites_view {
        "FAVORITES"
    } else {
        app.browse.name()
    };
    let mut spans = vec![
        mode_indicator,
        Span::styled(format!(" {} ", view), Theme::dimmed()),
    ];

    if let Some(msg) = app.detail_loading.message() {
        spans.push(Span::styled(format!("⟳ {} ", msg), Theme::loading()));
    }
    if let Some(last) = &app.last_listened {
        spans.push(Span::styled(format!("│ last: {} ", last), Theme::dimmed()));
    }
    spans.push(Span::styled(
        "│ q:quit /:search g:genre s:sort f:fav v:favorites l:resume ESC:back ",
        Theme::dimmed(),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(status, area);
}

fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}

/// Row marker for list items
pub(crate) fn marker(selected: bool) -> Span<'static> {
    if selected {
        Span::styled("▸ ", Theme::accent())
    } else {
        Span::styled("  ", Theme::dimmed())
    }
}

/// Bordered panel with a title
pub(crate) fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()))
}

/// Centered one-line message inside a panel
pub(crate) fn render_message(frame: &mut Frame, area: Rect, block: Block<'_>, msg: &str, style: Style) {
    let para = Paragraph::new(msg.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(para, area);
}
