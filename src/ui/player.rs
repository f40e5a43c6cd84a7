//! Now-playing bar

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Playback;
use crate::ui::Theme;

pub fn render_now_playing(frame: &mut Frame, area: Rect, playback: &Playback) {
    let line = Line::from(vec![
        Span::styled(" ▶ NOW PLAYING ", Theme::now_playing()),
        Span::raw(" "),
        Span::styled(playback.show_title.clone(), Theme::title()),
        Span::styled(
            format!(
                "  S{}E{}  {}",
                playback.season, playback.episode.number, playback.episode.title
            ),
            Theme::text(),
        ),
        Span::styled("  x:stop", Theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}
