//! App state and core application logic
//!
//! The browsing state is an explicit state machine driven by a single
//! [`App::update`] function. Side effects (network, playback, storage) are
//! returned as [`Effect`] values and executed by the runtime, whose results
//! come back in as [`Msg`] values.

use std::cell::Cell;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, info, warn};

use crate::api::CatalogError;
use crate::favorites::Favorites;
use crate::genres;
use crate::models::{Episode, Favorite, LastListened, Season, Show, ShowPreview};
use crate::transform::{self, ShowFilter, SortMode};

// =============================================================================
// Browse State
// =============================================================================

/// Where the user is in the show → season drill-down
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Browse {
    /// Top-level list of shows
    #[default]
    ShowList,
    /// A show's seasons
    ShowDetail { show: Show },
    /// One season's episodes; the parent show is kept alongside.
    /// Seasons are addressed by row, their numbers are only labels.
    SeasonDetail { show: Show, season_idx: usize },
}

impl Browse {
    fn at(show: Show, season_idx: Option<usize>) -> Self {
        match season_idx {
            Some(season_idx) => Browse::SeasonDetail { show, season_idx },
            None => Browse::ShowDetail { show },
        }
    }

    /// Selected show, if any
    pub fn show(&self) -> Option<&Show> {
        match self {
            Browse::ShowList => None,
            Browse::ShowDetail { show } | Browse::SeasonDetail { show, .. } => Some(show),
        }
    }

    /// Open season, if any
    pub fn season(&self) -> Option<&Season> {
        match self {
            Browse::SeasonDetail { show, season_idx } => show.seasons.get(*season_idx),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Browse::ShowList => "SHOWS",
            Browse::ShowDetail { .. } => "SHOW",
            Browse::SeasonDetail { .. } => "SEASON",
        }
    }
}

/// The episode handed to the player
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    pub show_id: String,
    pub show_title: String,
    /// Season number for display
    pub season: u32,
    pub episode: Episode,
    /// Rows the episode was started from
    pub season_idx: usize,
    pub episode_idx: usize,
}

impl Playback {
    pub fn url(&self) -> &str {
        &self.episode.file
    }

    /// Whether this is the episode at the given rows of the given show
    pub fn is_at(&self, show_id: &str, season_idx: usize, episode_idx: usize) -> bool {
        self.show_id == show_id && self.season_idx == season_idx && self.episode_idx == episode_idx
    }
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Typing into the filter box
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading indicator for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Selection State (per-list)
// =============================================================================

/// Cursor over a list view
///
/// The scroll offset is settled while rendering, which only borrows the app,
/// so it sits in a `Cell`. Moving the cursor inside the window leaves the
/// window where it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    offset: Cell<usize>,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: Cell::new(0),
            len,
        }
    }

    /// First visible row as of the last render
    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.pull_offset();
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        self.pull_offset();
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset.set(0);
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    fn pull_offset(&mut self) {
        if self.selected < self.offset.get() {
            self.offset.set(self.selected);
        }
    }

    /// Offset that keeps the selection visible in `visible_height` rows.
    /// The result is remembered for the next frame.
    pub fn visible_offset(&self, visible_height: usize) -> usize {
        let current = self.offset.get();
        let offset = if visible_height == 0 || self.selected < current {
            self.selected
        } else if self.selected >= current + visible_height {
            self.selected + 1 - visible_height
        } else {
            current
        };
        self.offset.set(offset);
        offset
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset.set(0);
    }

    /// Update length, clamping the selection into range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset.set(0);
        } else if self.selected >= len {
            self.selected = len - 1;
            self.pull_offset();
        }
    }
}

/// Filter and sort for one list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filter: ShowFilter,
    pub sort: SortMode,
}

// =============================================================================
// Messages and Effects
// =============================================================================

/// Everything that can change app state
#[derive(Debug)]
pub enum Msg {
    /// Bulk listing finished
    ShowsLoaded(Result<Vec<ShowPreview>, CatalogError>),
    /// Re-fetch the bulk listing
    Reload,
    /// Open a show; its detail is fetched
    SelectShow(String),
    /// Detail fetch finished for the request with this ticket
    ShowLoaded {
        ticket: u64,
        result: Result<Show, CatalogError>,
    },
    /// Open the season at this row of the current show
    SelectSeason(usize),
    /// Season → show, show → list
    Back,
    /// Play the episode at these rows of the current show
    PlayEpisode { season_idx: usize, episode_idx: usize },
    /// Stop playback
    Stop,
    /// The player exited on its own
    PlaybackFinished,
    PlayerFailed(String),
    ToggleFavorite {
        show_id: String,
        at: DateTime<Utc>,
    },
    EnterFavorites,
    ExitFavorites,
    ToggleFavoritesView,
    SetSort(SortMode),
    SetFavoriteSort(SortMode),
    /// Show-list search text; clears the genre filter
    SetFilterText(String),
    /// Show-list genre; clears the search text
    SetGenre(Option<u32>),
    SetFavoriteFilterText(String),
    SetFavoriteGenre(Option<u32>),
    /// Ask the runtime for the stored last-listened pointer
    RequestLastListened,
    /// Stored pointer read back; jumps to its show and season
    ResumeLastListened(Option<LastListened>),
    Quit,
}

/// Work for the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchShows,
    FetchShow { id: String, ticket: u64 },
    Play { url: String },
    StopPlayback,
    SaveLastListened(LastListened),
    LoadLastListened,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug, Default)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    pub input_mode: InputMode,
    /// Message for the error popup
    pub error: Option<String>,

    pub browse: Browse,
    /// Favorites list shown instead of the browse tree
    pub favorites_view: bool,
    pub playback: Option<Playback>,

    pub shows: Vec<ShowPreview>,
    pub shows_loading: LoadingState,
    pub detail_loading: LoadingState,
    pub favorites: Favorites,
    pub last_listened: Option<LastListened>,

    pub show_query: ListQuery,
    pub favorite_query: ListQuery,

    pub show_list: ListState,
    pub season_list: ListState,
    pub episode_list: ListState,
    pub favorite_list: ListState,

    /// Last ticket handed out for a detail fetch
    latest_ticket: u64,
    /// Ticket whose response is still awaited
    pending_ticket: Option<u64>,
    /// Season and episode numbers to open once the pending show arrives
    resume: Option<(u32, u32)>,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            ..Self::default()
        }
    }

    /// Initial sort modes for the two lists
    pub fn with_sorts(mut self, shows: SortMode, favorites: SortMode) -> Self {
        self.show_query.sort = shows;
        self.favorite_query.sort = favorites;
        self
    }

    /// Startup: fetch the listing
    pub fn init(&mut self) -> Vec<Effect> {
        self.shows_loading = LoadingState::Loading(Some("Loading shows...".into()));
        vec![Effect::FetchShows]
    }

    // -------------------------------------------------------------------------
    // Derived Views
    // -------------------------------------------------------------------------

    /// Shows after filter and sort
    pub fn visible_shows(&self) -> Vec<ShowPreview> {
        transform::transform_shows(&self.shows, &self.show_query.filter, self.show_query.sort)
    }

    /// Favorites after their own filter and sort
    pub fn visible_favorites(&self) -> Vec<Favorite> {
        self.favorites
            .view(&self.favorite_query.filter, self.favorite_query.sort)
    }

    /// Episodes of the open season, in catalog order
    pub fn current_episodes(&self) -> &[Episode] {
        self.browse
            .season()
            .map(|s| s.episodes.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_favorite(&self, show_id: &str) -> bool {
        self.favorites.contains(show_id)
    }

    /// Query of whichever list is on screen
    pub fn active_query(&self) -> &ListQuery {
        if self.favorites_view {
            &self.favorite_query
        } else {
            &self.show_query
        }
    }

    pub fn is_detail_pending(&self) -> bool {
        self.pending_ticket.is_some()
    }

    fn sync_lists(&mut self) {
        let shows = self.visible_shows().len();
        let favorites = self.visible_favorites().len();
        self.show_list.set_len(shows);
        self.favorite_list.set_len(favorites);
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Apply one message and return the effects it requires
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::ShowsLoaded(result) => {
                self.shows_loading = LoadingState::Idle;
                match result {
                    Ok(shows) => {
                        info!(count = shows.len(), "shows loaded");
                        self.shows = shows;
                        self.sync_lists();
                    }
                    Err(e) => error!(error = %e, "error fetching shows"),
                }
                Vec::new()
            }
            Msg::Reload => self.init(),
            Msg::SelectShow(id) => {
                self.resume = None;
                self.select_show(id)
            }
            Msg::ShowLoaded { ticket, result } => {
                self.show_loaded(ticket, result);
                Vec::new()
            }
            Msg::SelectSeason(idx) => {
                self.select_season(idx);
                Vec::new()
            }
            Msg::Back => {
                self.browse = match std::mem::take(&mut self.browse) {
                    Browse::SeasonDetail { show, .. } => Browse::ShowDetail { show },
                    Browse::ShowDetail { .. } | Browse::ShowList => Browse::ShowList,
                };
                Vec::new()
            }
            Msg::PlayEpisode {
                season_idx,
                episode_idx,
            } => self.play_episode(season_idx, episode_idx),
            Msg::Stop => {
                if self.playback.take().is_some() {
                    vec![Effect::StopPlayback]
                } else {
                    Vec::new()
                }
            }
            Msg::PlaybackFinished => {
                self.playback = None;
                Vec::new()
            }
            Msg::PlayerFailed(reason) => {
                warn!(%reason, "player failed");
                self.playback = None;
                self.error = Some(reason);
                Vec::new()
            }
            Msg::ToggleFavorite { show_id, at } => {
                self.toggle_favorite(&show_id, at);
                Vec::new()
            }
            Msg::EnterFavorites => {
                self.favorites_view = true;
                Vec::new()
            }
            Msg::ExitFavorites => {
                self.favorites_view = false;
                Vec::new()
            }
            Msg::ToggleFavoritesView => {
                self.favorites_view = !self.favorites_view;
                Vec::new()
            }
            Msg::SetSort(mode) => {
                self.show_query.sort = mode;
                Vec::new()
            }
            Msg::SetFavoriteSort(mode) => {
                self.favorite_query.sort = mode;
                Vec::new()
            }
            Msg::SetFilterText(text) => {
                self.show_query.filter = ShowFilter::text(text);
                self.show_list.reset();
                self.sync_lists();
                Vec::new()
            }
            Msg::SetGenre(genre) => {
                self.show_query.filter = genre.map(ShowFilter::genre).unwrap_or_default();
                self.show_list.reset();
                self.sync_lists();
                Vec::new()
            }
            Msg::SetFavoriteFilterText(text) => {
                self.favorite_query.filter = ShowFilter::text(text);
                self.favorite_list.reset();
                self.sync_lists();
                Vec::new()
            }
            Msg::SetFavoriteGenre(genre) => {
                self.favorite_query.filter = genre.map(ShowFilter::genre).unwrap_or_default();
                self.favorite_list.reset();
                self.sync_lists();
                Vec::new()
            }
            Msg::RequestLastListened => vec![Effect::LoadLastListened],
            Msg::ResumeLastListened(last) => match last {
                Some(last) => {
                    info!(%last, "resuming last listened");
                    self.favorites_view = false;
                    let effects = self.select_show(last.show_id.clone());
                    self.resume = last.season_episode();
                    self.last_listened = Some(last);
                    effects
                }
                None => {
                    info!("nothing listened yet");
                    Vec::new()
                }
            },
            Msg::Quit => {
                self.running = false;
                if self.playback.take().is_some() {
                    vec![Effect::StopPlayback]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn select_show(&mut self, id: String) -> Vec<Effect> {
        self.latest_ticket += 1;
        let ticket = self.latest_ticket;
        self.pending_ticket = Some(ticket);

        let title = self
            .shows
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.title.as_str())
            .unwrap_or("show");
        self.detail_loading = LoadingState::Loading(Some(format!("Loading {}...", title)));

        debug!(%id, ticket, "fetching show detail");
        vec![Effect::FetchShow { id, ticket }]
    }

    fn show_loaded(&mut self, ticket: u64, result: Result<Show, CatalogError>) {
        if self.pending_ticket != Some(ticket) {
            debug!(ticket, latest = self.latest_ticket, "ignoring stale show response");
            return;
        }
        self.pending_ticket = None;
        self.detail_loading = LoadingState::Idle;

        let show = match result {
            Ok(show) => show,
            Err(e) => {
                error!(error = %e, "error fetching show data");
                self.resume = None;
                return;
            }
        };

        self.season_list = ListState::new(show.seasons.len());
        self.browse = Browse::ShowDetail { show };

        // The stored pointer only has numbers; the first matching row wins
        if let Some((season, episode)) = self.resume.take() {
            let season_idx = self
                .browse
                .show()
                .and_then(|show| show.seasons.iter().position(|s| s.number == season));
            let Some(season_idx) = season_idx else {
                warn!(season, "resumed season no longer exists");
                return;
            };
            self.select_season(season_idx);
            let idx = self
                .current_episodes()
                .iter()
                .position(|e| e.number == episode);
            if let Some(idx) = idx {
                self.episode_list.selected = idx;
            }
        }
    }

    fn select_season(&mut self, idx: usize) {
        let (show, previous) = match std::mem::take(&mut self.browse) {
            Browse::ShowDetail { show } => (show, None),
            Browse::SeasonDetail { show, season_idx } => (show, Some(season_idx)),
            Browse::ShowList => {
                debug!(idx, "no show selected, ignoring season");
                return;
            }
        };

        match show.seasons.get(idx).map(|s| s.episodes.len()) {
            Some(episodes) => {
                self.season_list.selected = idx;
                self.episode_list = ListState::new(episodes);
                self.browse = Browse::SeasonDetail {
                    show,
                    season_idx: idx,
                };
            }
            None => {
                warn!(idx, show = %show.id, "no season at this row");
                self.browse = Browse::at(show, previous);
            }
        }
    }

    fn play_episode(&mut self, season_idx: usize, episode_idx: usize) -> Vec<Effect> {
        let Some(show) = self.browse.show() else {
            debug!("no show selected, ignoring play");
            return Vec::new();
        };
        let Some(season) = show.seasons.get(season_idx) else {
            warn!(season_idx, show = %show.id, "no season at this row");
            return Vec::new();
        };
        let Some(ep) = season.episodes.get(episode_idx) else {
            warn!(season = season.number, episode_idx, show = %show.id, "no episode at this row");
            return Vec::new();
        };
        if ep.file.is_empty() {
            warn!(season = season.number, episode = ep.number, show = %show.id, "episode has no audio file");
            return Vec::new();
        }

        let playback = Playback {
            show_id: show.id.clone(),
            show_title: show.title.clone(),
            season: season.number,
            episode: ep.clone(),
            season_idx,
            episode_idx,
        };
        let last = LastListened::new(show.id.clone(), season.number, ep.number);
        let url = playback.url().to_string();

        self.playback = Some(playback);
        self.last_listened = Some(last.clone());
        vec![Effect::Play { url }, Effect::SaveLastListened(last)]
    }

    fn toggle_favorite(&mut self, show_id: &str, at: DateTime<Utc>) {
        let preview = self
            .shows
            .iter()
            .find(|s| s.id == show_id)
            .cloned()
            .or_else(|| {
                self.browse
                    .show()
                    .filter(|s| s.id == show_id)
                    .map(Show::preview)
            })
            .or_else(|| self.favorites.get(show_id).map(|f| f.show.clone()));
        match preview {
            Some(preview) => {
                if self.favorites.toggle(preview, at) {
                    info!(show_id, "added to favorites");
                } else {
                    info!(show_id, "removed from favorites");
                }
            }
            None => warn!(show_id, "unknown show, cannot favorite"),
        }
        self.sync_lists();
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Translate a key press into messages, apply them, return the effects
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.update(Msg::Quit);
        }

        let msgs = if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        };

        msgs.into_iter().flat_map(|msg| self.update(msg)).collect()
    }

    fn filter_text_msg(&self, text: String) -> Msg {
        if self.favorites_view {
            Msg::SetFavoriteFilterText(text)
        } else {
            Msg::SetFilterText(text)
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Vec<Msg> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                Vec::new()
            }
            KeyCode::Char(c) => {
                let mut text = self.active_query().filter.text.clone();
                text.push(c);
                vec![self.filter_text_msg(text)]
            }
            KeyCode::Backspace => {
                let mut text = self.active_query().filter.text.clone();
                if text.pop().is_none() {
                    return Vec::new();
                }
                vec![self.filter_text_msg(text)]
            }
            _ => Vec::new(),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<Msg> {
        match key.code {
            KeyCode::Char('q') => vec![Msg::Quit],
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Editing;
                Vec::new()
            }
            KeyCode::Char('v') => vec![Msg::ToggleFavoritesView],
            KeyCode::Char('x') => vec![Msg::Stop],
            KeyCode::Char('r') => vec![Msg::Reload],
            KeyCode::Char('l') => vec![Msg::RequestLastListened],
            KeyCode::Char('s') => {
                let next = self.active_query().sort.next();
                if self.favorites_view {
                    vec![Msg::SetFavoriteSort(next)]
                } else {
                    vec![Msg::SetSort(next)]
                }
            }
            KeyCode::Char('g') => {
                let next = next_genre(self.active_query().filter.genre);
                if self.favorites_view {
                    vec![Msg::SetFavoriteGenre(next)]
                } else {
                    vec![Msg::SetGenre(next)]
                }
            }
            KeyCode::Char('f') => match self.favorite_target() {
                Some(show_id) => vec![Msg::ToggleFavorite {
                    show_id,
                    at: Utc::now(),
                }],
                None => Vec::new(),
            },
            KeyCode::Esc => {
                if self.favorites_view {
                    vec![Msg::ExitFavorites]
                } else {
                    vec![Msg::Back]
                }
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.active_list_mut().up();
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.active_list_mut().down();
                Vec::new()
            }
            KeyCode::PageUp => {
                self.active_list_mut().page_up(10);
                Vec::new()
            }
            KeyCode::PageDown => {
                self.active_list_mut().page_down(10);
                Vec::new()
            }
            KeyCode::Home => {
                self.active_list_mut().first();
                Vec::new()
            }
            KeyCode::End => {
                self.active_list_mut().last();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Cursor of whichever list is on screen
    pub fn active_list_mut(&mut self) -> &mut ListState {
        if self.favorites_view {
            return &mut self.favorite_list;
        }
        match self.browse {
            Browse::ShowList => &mut self.show_list,
            Browse::ShowDetail { .. } => &mut self.season_list,
            Browse::SeasonDetail { .. } => &mut self.episode_list,
        }
    }

    /// Show the `f` key applies to
    fn favorite_target(&self) -> Option<String> {
        if self.favorites_view {
            return self
                .visible_favorites()
                .get(self.favorite_list.selected)
                .map(|f| f.show.id.clone());
        }
        match &self.browse {
            Browse::ShowList => self
                .visible_shows()
                .get(self.show_list.selected)
                .map(|s| s.id.clone()),
            Browse::ShowDetail { show } | Browse::SeasonDetail { show, .. } => {
                Some(show.id.clone())
            }
        }
    }

    /// Enter on the selected row
    fn activate(&self) -> Vec<Msg> {
        if self.favorites_view {
            return self
                .visible_favorites()
                .get(self.favorite_list.selected)
                .map(|f| vec![Msg::SelectShow(f.show.id.clone()), Msg::ExitFavorites])
                .unwrap_or_default();
        }
        match &self.browse {
            Browse::ShowList => self
                .visible_shows()
                .get(self.show_list.selected)
                .map(|s| vec![Msg::SelectShow(s.id.clone())])
                .unwrap_or_default(),
            Browse::ShowDetail { show } => {
                let idx = self.season_list.selected;
                if idx < show.seasons.len() {
                    vec![Msg::SelectSeason(idx)]
                } else {
                    Vec::new()
                }
            }
            Browse::SeasonDetail { season_idx, .. } => {
                let idx = self.episode_list.selected;
                if idx < self.current_episodes().len() {
                    vec![Msg::PlayEpisode {
                        season_idx: *season_idx,
                        episode_idx: idx,
                    }]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

/// All genres → 1 → 2 → … → last → all genres
fn next_genre(current: Option<u32>) -> Option<u32> {
    let mut ids = genres::all().map(|(id, _)| id);
    match current {
        None => ids.next(),
        Some(g) => ids.skip_while(|id| *id != g).nth(1),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
