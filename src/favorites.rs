//! Session favorites
//!
//! A set of shows keyed by id. Lives only as long as the process.

use chrono::{DateTime, Utc};

use crate::models::{Favorite, ShowPreview};
use crate::transform::{self, ShowFilter, SortMode};

/// Favorite shows in the order they were marked
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    items: Vec<Favorite>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, show_id: &str) -> bool {
        self.items.iter().any(|f| f.show.id == show_id)
    }

    pub fn get(&self, show_id: &str) -> Option<&Favorite> {
        self.items.iter().find(|f| f.show.id == show_id)
    }

    /// Add a show. Returns false if it was already present.
    pub fn add(&mut self, show: ShowPreview, added_at: DateTime<Utc>) -> bool {
        if self.contains(&show.id) {
            return false;
        }
        self.items.push(Favorite { show, added_at });
        true
    }

    pub fn remove(&mut self, show_id: &str) -> Option<Favorite> {
        let idx = self.items.iter().position(|f| f.show.id == show_id)?;
        Some(self.items.remove(idx))
    }

    /// Flip membership. Returns true if the show is a favorite afterwards.
    pub fn toggle(&mut self, show: ShowPreview, at: DateTime<Utc>) -> bool {
        if self.remove(&show.id).is_some() {
            false
        } else {
            self.items.push(Favorite {
                show,
                added_at: at,
            });
            true
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Favorite> {
        self.items.iter()
    }

    /// Filtered and sorted copy for display
    pub fn view(&self, filter: &ShowFilter, mode: SortMode) -> Vec<Favorite> {
        transform::transform_favorites(&self.items, filter, mode)
    }
}
