//! Podcast catalog API client
//!
//! Two read-only endpoints: the bulk show listing and a single show with
//! its seasons and episodes.
//! API: https://podcast-api.netlify.app

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::genres;
use crate::models::{Episode, Season, Show, ShowPreview};

pub const DEFAULT_BASE_URL: &str = "https://podcast-api.netlify.app";

/// Catalog API error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Show not found")]
    NotFound,

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Catalog API client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    /// Client for the public catalog
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom base URL (config override, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Apply a request timeout. Requests never time out otherwise.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| CatalogError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound),
            status => Err(CatalogError::Status(status.as_u16())),
        }
    }

    /// Fetch all show summaries
    pub async fn shows(&self) -> Result<Vec<ShowPreview>, CatalogError> {
        let raw: Vec<PreviewResponse> = self.get("/shows").await?;
        Ok(raw.into_iter().map(PreviewResponse::into_preview).collect())
    }

    /// Fetch one show with seasons and episodes
    pub async fn show(&self, id: &str) -> Result<Show, CatalogError> {
        let endpoint = format!("/shows/{}", urlencoding::encode(id));
        let body: DetailBody = self.get(&endpoint).await?;
        body.into_show().ok_or(CatalogError::NotFound)
    }
}

// =============================================================================
// Response Types (internal)
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(u64),
}

impl IdValue {
    fn into_string(self) -> String {
        match self {
            IdValue::Text(s) => s,
            IdValue::Number(n) => n.to_string(),
        }
    }
}

/// Listing responses carry ids, detail responses sometimes carry labels
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenreValue {
    Id(u32),
    Label(String),
}

fn genre_ids(raw: Option<Vec<GenreValue>>) -> Vec<u32> {
    raw.unwrap_or_default()
        .into_iter()
        .filter_map(|g| match g {
            GenreValue::Id(id) => Some(id),
            GenreValue::Label(label) => genres::genre_id(&label),
        })
        .collect()
}

/// `seasons` is a count in the listing and an array in detail
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeasonsValue {
    Count(usize),
    List(Vec<serde_json::Value>),
}

fn parse_updated(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[derive(Debug, Deserialize)]
struct PreviewResponse {
    id: IdValue,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    genres: Option<Vec<GenreValue>>,
    updated: Option<String>,
    seasons: Option<SeasonsValue>,
}

impl PreviewResponse {
    fn into_preview(self) -> ShowPreview {
        let season_count = match self.seasons {
            Some(SeasonsValue::Count(n)) => n,
            Some(SeasonsValue::List(list)) => list.len(),
            None => 0,
        };
        ShowPreview {
            id: self.id.into_string(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image: self.image,
            genres: genre_ids(self.genres),
            updated: parse_updated(self.updated.as_deref()),
            season_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetailBody {
    Many(Vec<ShowResponse>),
    One(ShowResponse),
}

impl DetailBody {
    fn into_show(self) -> Option<Show> {
        match self {
            DetailBody::Many(list) => list.into_iter().next().map(ShowResponse::into_show),
            DetailBody::One(show) => Some(show.into_show()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ShowResponse {
    id: IdValue,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    genres: Option<Vec<GenreValue>>,
    updated: Option<String>,
    seasons: Option<Vec<SeasonResponse>>,
}

impl ShowResponse {
    fn into_show(self) -> Show {
        Show {
            id: self.id.into_string(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image: self.image,
            genres: genre_ids(self.genres),
            updated: parse_updated(self.updated.as_deref()),
            seasons: self
                .seasons
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(i, s)| s.into_season(i as u32 + 1))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeasonResponse {
    season: Option<u32>,
    title: Option<String>,
    image: Option<String>,
    episodes: Option<Vec<EpisodeResponse>>,
}

impl SeasonResponse {
    /// `position` is 1-based and stands in for a missing season number
    fn into_season(self, position: u32) -> Season {
        let number = self.season.unwrap_or(position);
        Season {
            number,
            title: self.title.unwrap_or_else(|| format!("Season {}", number)),
            image: self.image,
            episodes: self
                .episodes
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(i, e)| e.into_episode(i as u32 + 1))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EpisodeResponse {
    episode: Option<u32>,
    title: Option<String>,
    description: Option<String>,
    file: Option<String>,
}

impl EpisodeResponse {
    fn into_episode(self, position: u32) -> Episode {
        Episode {
            number: self.episode.unwrap_or(position),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            file: self.file.unwrap_or_default(),
        }
    }
}
