//! Filtering and sorting for show and favorite lists
//!
//! Everything here is pure: inputs are borrowed, results are fresh vectors.
//! The same transform drives the show list (dated by last update) and the
//! favorites list (dated by when the show was marked).

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Favorite, ShowPreview};

// =============================================================================
// Sort Mode
// =============================================================================

/// Ordering applied to a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Title A-Z
    #[default]
    Title,
    /// Title Z-A
    TitleDesc,
    /// Oldest first
    DateAsc,
    /// Newest first
    DateDesc,
    /// Keep source order
    Unsorted,
}

impl SortMode {
    /// Parse a mode name. Anything unrecognized keeps the source order.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "title" => SortMode::Title,
            "title-desc" => SortMode::TitleDesc,
            "date-asc" => SortMode::DateAsc,
            "date-desc" => SortMode::DateDesc,
            _ => SortMode::Unsorted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Title => "title",
            SortMode::TitleDesc => "title-desc",
            SortMode::DateAsc => "date-asc",
            SortMode::DateDesc => "date-desc",
            SortMode::Unsorted => "none",
        }
    }

    /// Short label for the UI
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Title => "Title (A-Z)",
            SortMode::TitleDesc => "Title (Z-A)",
            SortMode::DateAsc => "Date (Ascending)",
            SortMode::DateDesc => "Date (Descending)",
            SortMode::Unsorted => "Unsorted",
        }
    }

    /// Next mode when cycling with a single key
    pub fn next(&self) -> Self {
        match self {
            SortMode::Title => SortMode::TitleDesc,
            SortMode::TitleDesc => SortMode::DateAsc,
            SortMode::DateAsc => SortMode::DateDesc,
            SortMode::DateDesc | SortMode::Unsorted => SortMode::Title,
        }
    }
}

impl FromStr for SortMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortMode::parse(s))
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Free-text and genre filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowFilter {
    pub text: String,
    pub genre: Option<u32>,
}

impl ShowFilter {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            genre: None,
        }
    }

    pub fn genre(genre: u32) -> Self {
        Self {
            text: String::new(),
            genre: Some(genre),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.genre.is_none()
    }

    /// Case-insensitive title substring AND (no genre OR genre present)
    pub fn matches<T: Listed>(&self, item: &T) -> bool {
        let title_ok = self.text.is_empty()
            || item
                .title()
                .to_lowercase()
                .contains(&self.text.to_lowercase());
        let genre_ok = self.genre.map_or(true, |g| item.genres().contains(&g));
        title_ok && genre_ok
    }
}

// =============================================================================
// Listed Items
// =============================================================================

/// Anything that can appear in a filtered, sorted list
pub trait Listed {
    fn title(&self) -> &str;
    fn genres(&self) -> &[u32];
    /// Timestamp used by the date sort modes
    fn sort_date(&self) -> Option<DateTime<Utc>>;
}

impl Listed for ShowPreview {
    fn title(&self) -> &str {
        &self.title
    }

    fn genres(&self) -> &[u32] {
        &self.genres
    }

    fn sort_date(&self) -> Option<DateTime<Utc>> {
        self.updated
    }
}

impl Listed for Favorite {
    fn title(&self) -> &str {
        &self.show.title
    }

    fn genres(&self) -> &[u32] {
        &self.show.genres
    }

    fn sort_date(&self) -> Option<DateTime<Utc>> {
        Some(self.added_at)
    }
}

/// Primary collation key: decomposed, accents dropped, case folded.
/// "Économie" keys as "economie" and lands among the e's.
fn collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accent- and case-insensitive comparison. Ties fall back to the
/// lowercase form, then the raw string, so distinct titles never compare
/// equal.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Missing dates order before any present date.
fn compare_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    a.cmp(&b)
}

/// Sort in place. Stable, so equal keys keep their relative order.
pub fn sort_items<T: Listed>(items: &mut [T], mode: SortMode) {
    match mode {
        SortMode::Title => items.sort_by(|a, b| compare_titles(a.title(), b.title())),
        SortMode::TitleDesc => items.sort_by(|a, b| compare_titles(b.title(), a.title())),
        SortMode::DateAsc => items.sort_by(|a, b| compare_dates(a.sort_date(), b.sort_date())),
        SortMode::DateDesc => items.sort_by(|a, b| compare_dates(b.sort_date(), a.sort_date())),
        SortMode::Unsorted => {}
    }
}

/// Filter then sort into a new vector; the source is left untouched.
pub fn transform<T: Listed + Clone>(items: &[T], filter: &ShowFilter, mode: SortMode) -> Vec<T> {
    let mut out: Vec<T> = items
        .iter()
        .filter(|item| filter.matches(*item))
        .cloned()
        .collect();
    sort_items(&mut out, mode);
    out
}

pub fn transform_shows(shows: &[ShowPreview], filter: &ShowFilter, mode: SortMode) -> Vec<ShowPreview> {
    transform(shows, filter, mode)
}

pub fn transform_favorites(favorites: &[Favorite], filter: &ShowFilter, mode: SortMode) -> Vec<Favorite> {
    transform(favorites, filter, mode)
}
