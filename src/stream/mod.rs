//! Audio playback
//!
//! - Player: external mpv/VLC process per episode

pub mod player;

pub use player::{AudioPlayer, PlayerError, PlayerType};
