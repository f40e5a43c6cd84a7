//! podtui - Terminal podcast browser
//!
//! Browse a podcast catalog, filter and sort it, keep favorites and listen
//! to episodes through an external player.
//!
//! # Modules
//!
//! - `models` - Shows, seasons, episodes, favorites
//! - `genres` - Static genre table
//! - `transform` - Filtering and sorting of show lists
//! - `favorites` - Session favorites set
//! - `store` - Persisted last-listened pointer
//! - `api` - Catalog HTTP client
//! - `stream` - External audio player
//! - `app` - Application state, messages and effects
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod favorites;
pub mod genres;
pub mod models;
pub mod store;
pub mod stream;
pub mod transform;
pub mod ui;

// Re-export commonly used types
pub use models::{Episode, Favorite, LastListened, Season, Show, ShowPreview};

pub use api::{CatalogClient, CatalogError};
pub use app::{App, Effect, Msg};
pub use favorites::Favorites;
pub use store::LocalStore;
pub use transform::{ShowFilter, SortMode};
