//! Static genre table
//!
//! The catalog identifies genres by integer id. Labels ship with the binary
//! and are built once on first access.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Label used for any id missing from the table
pub const UNKNOWN_GENRE: &str = "Unknown Genre";

const TABLE: [(u32, &str); 9] = [
    (1, "Personal Growth"),
    (2, "True Crime and Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

static GENRES: LazyLock<HashMap<u32, &'static str>> = LazyLock::new(|| TABLE.into_iter().collect());

/// Label for a genre id
pub fn genre_title(id: u32) -> &'static str {
    GENRES.get(&id).copied().unwrap_or(UNKNOWN_GENRE)
}

/// Reverse lookup, case-insensitive. Detail responses sometimes carry labels.
pub fn genre_id(title: &str) -> Option<u32> {
    TABLE
        .iter()
        .find(|(_, label)| label.eq_ignore_ascii_case(title.trim()))
        .map(|(id, _)| *id)
}

pub fn labels(ids: &[u32]) -> Vec<&'static str> {
    ids.iter().map(|id| genre_title(*id)).collect()
}

/// All known genres in id order
pub fn all() -> impl Iterator<Item = (u32, &'static str)> {
    TABLE.into_iter()
}
