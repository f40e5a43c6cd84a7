//! Show and season detail views
//!
//! Left: show info. Right: seasons (show detail) or episodes (season detail).

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{self, Season, Show};
use crate::ui::{self, Theme};

pub fn render_show_detail(frame: &mut Frame, area: Rect, app: &App, show: &Show) {
    let chunks = split(area);
    render_info_panel(frame, chunks[0], app, show);
    render_seasons_panel(frame, chunks[1], app, show);
}

pub fn render_season_detail(frame: &mut Frame, area: Rect, app: &App, show: &Show, season_idx: usize) {
    let chunks = split(area);
    render_info_panel(frame, chunks[0], app, show);
    match show.seasons.get(season_idx) {
        Some(season) => render_episodes_panel(frame, chunks[1], app, show, season_idx, season),
        None => ui::render_message(
            frame,
            chunks[1],
            ui::panel(" EPISODES ".into(), true),
            "Season not found",
            Theme::dimmed(),
        ),
    }
}

fn split(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area)
}

fn render_info_panel(frame: &mut Frame, area: Rect, app: &App, show: &Show) {
    let block = ui::panel(" INFO ".into(), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut title = vec![
        Span::styled("▶ ", Theme::accent()),
        Span::styled(show.title.clone(), Theme::title()),
    ];
    if app.is_favorite(&show.id) {
        title.push(Span::styled(" ♥", Theme::favorite()));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(vec![
            Span::styled(format!("{} seasons", show.seasons.len()), Theme::secondary()),
            Span::styled(" │ ", Theme::dimmed()),
            Span::styled(format!("{} episodes", show.episode_count()), Theme::secondary()),
        ]),
        Line::from(vec![
            Span::styled("Last Updated: ", Theme::dimmed()),
            Span::styled(models::format_date(show.updated), Theme::date()),
        ]),
    ];
    if !show.genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genres: ", Theme::dimmed()),
            Span::styled(show.preview().genre_labels(), Theme::text()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Theme::dimmed(),
    )));
    for line in show.description.lines() {
        lines.push(Line::from(Span::styled(line.to_string(), Theme::text())));
    }

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn render_seasons_panel(frame: &mut Frame, area: Rect, app: &App, show: &Show) {
    let block = ui::panel(format!(" SEASONS ({}) ", show.seasons.len()), true);

    if show.seasons.is_empty() {
        ui::render_message(frame, area, block, "No seasons", Theme::dimmed());
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = (inner.height as usize / 2).max(1);
    let offset = app.season_list.visible_offset(visible);

    let items: Vec<ListItem> = show
        .seasons
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, season)| {
            let selected = i == app.season_list.selected;
            ListItem::new(vec![
                Line::from(vec![
                    ui::marker(selected),
                    Span::styled(
                        season.to_string(),
                        if selected {
                            Theme::highlighted()
                        } else {
                            Theme::text()
                        },
                    ),
                ]),
                Line::from(Span::styled(
                    format!("    Episodes: {}", season.episodes.len()),
                    Theme::dimmed(),
                )),
            ])
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_episodes_panel(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    show: &Show,
    season_idx: usize,
    season: &Season,
) {
    let block = ui::panel(
        format!(" SEASON {}: {} ({}) ", season.number, season.title, season.episodes.len()),
        true,
    );

    if season.episodes.is_empty() {
        ui::render_message(frame, area, block, "No episodes", Theme::dimmed());
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height as usize;
    let offset = app.episode_list.visible_offset(visible);

    let items: Vec<ListItem> = season
        .episodes
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, ep)| {
            let selected = i == app.episode_list.selected;
            let mut spans = vec![
                ui::marker(selected),
                Span::styled(
                    ep.to_string(),
                    if selected {
                        Theme::highlighted()
                    } else {
                        Theme::text()
                    },
                ),
            ];
            let playing = app
                .playback
                .as_ref()
                .is_some_and(|p| p.is_at(&show.id, season_idx, i));
            if playing {
                spans.push(Span::styled(" ♪", Theme::success()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}
