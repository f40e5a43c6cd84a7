//! Data structures for podtui
//!
//! Catalog models as the rest of the app sees them. Raw API shapes live in
//! `api::catalog` and are converted into these types on arrival.
//! - **Catalog**: show summaries, full shows, seasons, episodes
//! - **Library**: favorites and the last-listened pointer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::genres;

// =============================================================================
// Catalog Models
// =============================================================================

/// Show summary as returned by the bulk listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowPreview {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub genres: Vec<u32>,
    pub updated: Option<DateTime<Utc>>,
    pub season_count: usize,
}

impl ShowPreview {
    /// Genre labels joined for display ("Comedy, History")
    pub fn genre_labels(&self) -> String {
        genres::labels(&self.genres).join(", ")
    }
}

impl fmt::Display for ShowPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} Seasons)", self.title, self.season_count)
    }
}

/// Full show detail including seasons and episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub genres: Vec<u32>,
    pub updated: Option<DateTime<Utc>>,
    pub seasons: Vec<Season>,
}

impl Show {
    /// First season carrying this number. Numbers can repeat in catalog
    /// data, so views address seasons by position instead.
    pub fn season(&self, number: u32) -> Option<&Season> {
        self.seasons.iter().find(|s| s.number == number)
    }

    /// Summary view of this show, used when it lands in favorites
    pub fn preview(&self) -> ShowPreview {
        ShowPreview {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            genres: self.genres.clone(),
            updated: self.updated,
            season_count: self.seasons.len(),
        }
    }

    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} Seasons)", self.title, self.seasons.len())
    }
}

/// A numbered grouping of episodes within a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub number: u32,
    pub title: String,
    pub image: Option<String>,
    pub episodes: Vec<Episode>,
}

impl Season {
    /// First episode carrying this number
    pub fn episode(&self, number: u32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.number == number)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Season {}: {}", self.number, self.title)
    }
}

/// A single playable audio item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub number: u32,
    pub title: String,
    pub description: String,
    /// Audio source URL
    pub file: String,
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.title)
    }
}

// =============================================================================
// Library Models
// =============================================================================

/// A show marked as favorite, with the moment it was marked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub show: ShowPreview,
    pub added_at: DateTime<Utc>,
}

/// Pointer to the most recently played episode
///
/// Serialized as `{ "showId": .., "episodeId": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastListened {
    pub show_id: String,
    pub episode_id: String,
}

impl LastListened {
    pub fn new(show_id: impl Into<String>, season: u32, episode: u32) -> Self {
        Self {
            show_id: show_id.into(),
            episode_id: episode_id(season, episode),
        }
    }

    /// Season and episode numbers, if the episode id has the `S-E` form
    pub fn season_episode(&self) -> Option<(u32, u32)> {
        let (season, episode) = self.episode_id.split_once('-')?;
        Some((season.parse().ok()?, episode.parse().ok()?))
    }
}

impl fmt::Display for LastListened {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.season_episode() {
            Some((s, e)) => write!(f, "show {} season {} episode {}", self.show_id, s, e),
            None => write!(f, "show {} episode {}", self.show_id, self.episode_id),
        }
    }
}

/// Episode numbers restart every season, so the id carries both
pub fn episode_id(season: u32, episode: u32) -> String {
    format!("{}-{}", season, episode)
}

/// Human date like "November 3, 2022"
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => "Unknown date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_show() -> Show {
        Show {
            id: "10716".into(),
            title: "Something Was Wrong".into(),
            description: "An award-winning docuseries".into(),
            image: None,
            genres: vec![2],
            updated: None,
            seasons: vec![
                Season {
                    number: 1,
                    title: "Season 1".into(),
                    image: None,
                    episodes: vec![
                        Episode {
                            number: 1,
                            title: "Pilot".into(),
                            description: String::new(),
                            file: "https://example.com/1.mp3".into(),
                        },
                        Episode {
                            number: 2,
                            title: "Second".into(),
                            description: String::new(),
                            file: "https://example.com/2.mp3".into(),
                        },
                    ],
                },
                Season {
                    number: 3,
                    title: "Season 3".into(),
                    image: None,
                    episodes: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_season_lookup_by_number() {
        let show = sample_show();
        assert_eq!(show.season(3).map(|s| s.title.as_str()), Some("Season 3"));
        assert!(show.season(2).is_none());
        assert_eq!(show.episode_count(), 2);
    }

    #[test]
    fn test_preview_counts_seasons() {
        let preview = sample_show().preview();
        assert_eq!(preview.season_count, 2);
        assert_eq!(preview.to_string(), "Something Was Wrong (2 Seasons)");
    }

    #[test]
    fn test_last_listened_json_keys() {
        let last = LastListened::new("10716", 1, 2);
        let json = serde_json::to_value(&last).unwrap();
        assert_eq!(json["showId"], "10716");
        assert_eq!(json["episodeId"], "1-2");
        assert_eq!(last.season_episode(), Some((1, 2)));
    }

    #[test]
    fn test_last_listened_foreign_episode_id() {
        let last = LastListened {
            show_id: "1".into(),
            episode_id: "abc".into(),
        };
        assert_eq!(last.season_episode(), None);
        assert_eq!(last.to_string(), "show 1 episode abc");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2022, 11, 3, 7, 0, 0).unwrap();
        assert_eq!(format_date(Some(date)), "November 3, 2022");
        assert_eq!(format_date(None), "Unknown date");
    }
}
