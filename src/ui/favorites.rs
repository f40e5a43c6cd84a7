//! Favorites view

use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
};

use crate::app::App;
use crate::models::Favorite;
use crate::ui::{self, Theme};

pub fn render_favorites(frame: &mut Frame, area: Rect, app: &App) {
    let favorites = app.visible_favorites();
    let block = ui::panel(format!(" YOUR FAVORITE SHOWS ({}) ", favorites.len()), true);

    if favorites.is_empty() {
        let msg = if app.favorites.is_empty() {
            "No favorites yet. Press f on a show to add it."
        } else {
            "No favorites match the current filter"
        };
        ui::render_message(frame, area, block, msg, Theme::dimmed());
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height as usize;
    let offset = app.favorite_list.visible_offset(visible);

    let items: Vec<ListItem> = favorites
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, fav)| favorite_item(fav, i == app.favorite_list.selected))
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn favorite_item(fav: &Favorite, selected: bool) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        ui::marker(selected),
        Span::styled("♥ ", Theme::favorite()),
        Span::styled(
            format!("Show: {}", fav.show.title),
            if selected {
                Theme::highlighted()
            } else {
                Theme::text()
            },
        ),
        Span::styled("  added ", Theme::dimmed()),
        Span::styled(
            fav.added_at.format("%B %-d, %Y %H:%M").to_string(),
            Theme::date(),
        ),
    ]))
}
