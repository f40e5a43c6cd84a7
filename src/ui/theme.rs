//! Color theme for podtui
//!
//! A warm "night radio" palette: amber on charcoal with teal accents.

use ratatui::style::{Color, Modifier, Style};

/// Palette and style helpers
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #16161d (charcoal)
    pub const BACKGROUND: Color = Color::Rgb(0x16, 0x16, 0x1d);

    /// Primary: #ffb454 (amber)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xb4, 0x54);

    /// Secondary: #4fd6be (teal)
    pub const SECONDARY: Color = Color::Rgb(0x4f, 0xd6, 0xbe);

    /// Accent: #ff7a93 (rose), used for favorites
    pub const ACCENT: Color = Color::Rgb(0xff, 0x7a, 0x93);

    /// Text: #e6e1cf (paper)
    pub const TEXT: Color = Color::Rgb(0xe6, 0xe1, 0xcf);

    /// Dim: #8a8fa3 (slate)
    pub const DIM: Color = Color::Rgb(0x8a, 0x8f, 0xa3);

    /// Success: #aad94c (green)
    pub const SUCCESS: Color = Color::Rgb(0xaa, 0xd9, 0x4c);

    /// Error: #f26d78 (red)
    pub const ERROR: Color = Color::Rgb(0xf2, 0x6d, 0x78);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Panels and bars
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x24, 0x25, 0x30);

    /// Border color (muted amber)
    pub const BORDER: Color = Color::Rgb(0x80, 0x64, 0x3c);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Selected row (inverted amber)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Panel titles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Selection marker and headings inside panels
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Heart next to favorite shows
    pub fn favorite() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Last-updated and added-at dates
    pub fn date() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn genre() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Now-playing bar
    pub fn now_playing() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }
}
