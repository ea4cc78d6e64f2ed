use image::DynamicImage;
use ratatui::{layout::Rect, widgets::ListState};
use std::collections::HashMap;
use std::process::Stdio;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, SearchSummary, Video, fetch_thumbnail};
use crate::config::Config;
use crate::constants::constants;
use crate::graphics::RenderMode;
use crate::theme::{THEMES, Theme};

// --- Types ---

pub type VideosResult = Result<Vec<Video>, ApiError>;
pub type SearchResult = Result<SearchSummary, ApiError>;

/// Informational notice for a fetch that succeeded with zero records.
pub const PLAYLIST_EMPTY_NOTICE: &str = "Your playlist is empty.";

/// Which screen is visible. This is the whole router: no history stack,
/// no guard conditions on either transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  Home,
  Search,
}

/// Focused control on the Search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
  Keywords,
  MaxResults,
  Added,
}

/// Home-screen state: the playlist and its fetch status.
///
/// `loading`, `error`, and `notice` are independently settable; the render
/// functions decide which branch is displayed, not the state shape.
#[derive(Default)]
pub struct PlaylistPane {
  /// Server-provided order, significant for display rank. Replaced
  /// wholesale on every successful fetch, never patched.
  pub videos: Vec<Video>,
  pub loading: bool,
  pub error: Option<String>,
  pub notice: Option<String>,
  pub list_state: ListState,
}

/// Search-screen state. Rebuilt from scratch on every visit, so a
/// half-typed form or stale summary never leaks across navigations.
pub struct SearchPane {
  pub keywords: String,
  /// Cursor position within `keywords` (char index).
  pub cursor: usize,
  /// Horizontal scroll offset of the keyword input.
  pub scroll: usize,
  /// Bounded result count. The slider keys and direct digit entry both
  /// mutate this one field; the two renderings can never disagree.
  pub max_results: u8,
  pub loading: bool,
  pub error: Option<String>,
  pub summary: Option<SearchSummary>,
  pub field: SearchField,
  pub added_state: ListState,
}

impl Default for SearchPane {
  fn default() -> Self {
    Self {
      keywords: String::new(),
      cursor: 0,
      scroll: 0,
      max_results: constants().default_max_results,
      loading: false,
      error: None,
      summary: None,
      field: SearchField::Keywords,
      added_state: ListState::default(),
    }
  }
}

impl SearchPane {
  /// Whether submission is currently allowed. Blank keywords block at the
  /// input level — no request, no error banner.
  pub fn can_submit(&self) -> bool {
    !self.keywords.trim().is_empty()
  }

  pub fn set_max_results(&mut self, value: u8) {
    self.max_results = value.clamp(constants().max_results_min, constants().max_results_max);
  }

  /// Slider movement: step the bounded value by `delta`.
  pub fn nudge_max_results(&mut self, delta: i16) {
    let c = constants();
    let next = (i16::from(self.max_results) + delta).clamp(i16::from(c.max_results_min), i16::from(c.max_results_max));
    self.max_results = next as u8;
  }

  /// Numeric entry: append a typed digit. Out-of-range input restarts the
  /// entry with the digit itself, so typing "35" after "50" behaves as a
  /// number field rather than an error.
  pub fn push_max_results_digit(&mut self, digit: u8) {
    let c = constants();
    let next = u16::from(self.max_results) * 10 + u16::from(digit);
    if (u16::from(c.max_results_min)..=u16::from(c.max_results_max)).contains(&next) {
      self.max_results = next as u8;
    } else if (c.max_results_min..=c.max_results_max).contains(&digit) {
      self.max_results = digit;
    }
  }

  /// Numeric entry: backspace strips the last digit.
  pub fn pop_max_results_digit(&mut self) {
    self.max_results = (self.max_results / 10).max(constants().max_results_min);
  }

  /// Tab order: keywords → max results → added list (when one exists) → back.
  pub fn next_field(&mut self) {
    let has_added = self.summary.as_ref().is_some_and(|s| !s.videos.is_empty());
    self.field = match self.field {
      SearchField::Keywords => SearchField::MaxResults,
      SearchField::MaxResults if has_added => SearchField::Added,
      SearchField::MaxResults | SearchField::Added => SearchField::Keywords,
    };
  }
}

/// In-flight async work: at most one pending receiver per action.
/// Replacing a receiver drops the old one, so a stale response has
/// nowhere to land — the latest submission always wins.
#[derive(Default)]
pub(crate) struct AsyncTasks {
  pub(crate) videos_rx: Option<oneshot::Receiver<VideosResult>>,
  pub(crate) search_rx: Option<oneshot::Receiver<SearchResult>>,
  pub(crate) thumbs_rx: Option<mpsc::Receiver<(String, DynamicImage)>>,
  pub(crate) thumbs_handle: Option<JoinHandle<()>>,
}

/// Terminal graphics protocol state (Kitty).
#[derive(Default)]
pub struct GraphicsCache {
  /// Where the preview pane wants the image this frame, if anywhere.
  pub thumb_area: Option<Rect>,
  /// Video id and area of the image last transmitted to the terminal.
  pub last_sent: Option<(String, Rect)>,
  /// Cached cell-mode resize keyed by (video id, area width, area height).
  pub resized: Option<(String, u16, u16, DynamicImage)>,
}

pub struct App {
  pub screen: Screen,
  pub playlist: PlaylistPane,
  pub search: SearchPane,
  pub theme_index: usize,
  pub render_mode: RenderMode,
  pub should_quit: bool,
  pub api: ApiClient,
  /// Decoded card thumbnails, filled progressively by the prefetch task.
  pub thumbs: HashMap<String, DynamicImage>,
  pub gfx: GraphicsCache,
  pub(crate) tasks: AsyncTasks,
}

impl App {
  pub fn new(api: ApiClient, render_mode: RenderMode) -> Self {
    let config = Config::load();
    let theme_index = config
      .theme_name
      .as_deref()
      .and_then(|name| THEMES.iter().position(|t| t.name == name))
      .unwrap_or(0);

    Self {
      screen: Screen::Home,
      playlist: PlaylistPane::default(),
      search: SearchPane::default(),
      theme_index,
      render_mode,
      should_quit: false,
      api,
      thumbs: HashMap::new(),
      gfx: GraphicsCache::default(),
      tasks: AsyncTasks::default(),
    }
  }

  pub fn theme(&self) -> &'static Theme {
    // Safety: theme_index is always bounded by modular arithmetic in
    // next_theme() and clamped on initialization.
    &THEMES[self.theme_index]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    Config { theme_name: Some(self.theme().name.to_string()) }.save();
  }

  // --- Router ---

  /// Home → Search. The search view starts from a fresh form every visit.
  pub fn go_to_search(&mut self) {
    self.search = SearchPane::default();
    self.screen = Screen::Search;
  }

  /// Search → Home. The playlist is not refetched; dropping the pending
  /// receiver orphans any in-flight search, discarding its response.
  pub fn go_home(&mut self) {
    self.tasks.search_rx = None;
    self.screen = Screen::Home;
  }

  // --- Playlist ---

  /// Kick off a playlist fetch. Runs once at startup and again on the
  /// refresh key; the key is a no-op while a fetch is already in flight.
  pub fn trigger_refresh(&mut self) {
    if self.playlist.loading {
      return;
    }
    info!("playlist: fetch");
    self.playlist.loading = true;
    self.playlist.error = None;
    self.playlist.notice = None;

    let api = self.api.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(api.fetch_videos().await);
    });
    self.tasks.videos_rx = Some(rx);
  }

  pub fn selected_video(&self) -> Option<&Video> {
    self.playlist.list_state.selected().and_then(|i| self.playlist.videos.get(i))
  }

  /// The selected card's decoded thumbnail, when the prefetch has it.
  pub fn selected_thumb(&self) -> Option<(&str, &DynamicImage)> {
    let video = self.selected_video()?;
    self.thumbs.get(&video.id).map(|image| (video.id.as_str(), image))
  }

  pub fn select_next(&mut self) {
    let count = self.playlist.videos.len();
    if count > 0 {
      let i = self.playlist.list_state.selected().map_or(0, |i| (i + 1) % count);
      self.playlist.list_state.select(Some(i));
    }
  }

  pub fn select_prev(&mut self) {
    let count = self.playlist.videos.len();
    if count > 0 {
      let i = self.playlist.list_state.selected().map_or(0, |i| if i == 0 { count - 1 } else { i - 1 });
      self.playlist.list_state.select(Some(i));
    }
  }

  /// Open the selected card's video in the system browser, detached.
  pub fn open_selected(&mut self) {
    let Some(video) = self.selected_video() else { return };
    let url = video.url.clone();
    info!(url = %url, "opening video in browser");

    #[cfg(target_os = "macos")]
    let cmd = "open";
    #[cfg(not(target_os = "macos"))]
    let cmd = "xdg-open";

    match std::process::Command::new(cmd)
      .arg(&url)
      .stdin(Stdio::null())
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .spawn()
    {
      Ok(mut child) => {
        // Reap the child in a background thread to avoid zombie processes.
        std::thread::spawn(move || {
          let _ = child.wait();
        });
      }
      Err(e) => {
        self.playlist.error = Some(format!("Failed to open browser: {}", e));
      }
    }
  }

  // --- Search ---

  /// Submit the search form. Blank keywords never issue a request; a
  /// resubmission while one is in flight replaces the pending receiver.
  pub fn trigger_search_add(&mut self) {
    let keywords = self.search.keywords.trim().to_string();
    if keywords.is_empty() {
      return;
    }
    info!(keywords = %keywords, max_results = self.search.max_results, "search: submit");
    self.search.summary = None;
    self.search.error = None;
    self.search.loading = true;

    let api = self.api.clone();
    let max_results = u32::from(self.search.max_results);
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(api.search_and_add(&keywords, max_results).await);
    });
    self.tasks.search_rx = Some(rx);
  }

  pub fn select_next_added(&mut self) {
    let count = self.search.summary.as_ref().map_or(0, |s| s.videos.len());
    if count > 0 {
      let i = self.search.added_state.selected().map_or(0, |i| (i + 1) % count);
      self.search.added_state.select(Some(i));
    }
  }

  pub fn select_prev_added(&mut self) {
    let count = self.search.summary.as_ref().map_or(0, |s| s.videos.len());
    if count > 0 {
      let i = self.search.added_state.selected().map_or(0, |i| if i == 0 { count - 1 } else { i - 1 });
      self.search.added_state.select(Some(i));
    }
  }

  // --- Completion polling ---

  /// Poll every pending receiver once per tick and apply whatever
  /// resolved. Loading flags are cleared on all arms, success or not.
  pub fn check_pending(&mut self) {
    if let Some(mut rx) = self.tasks.videos_rx.take() {
      match rx.try_recv() {
        Ok(result) => {
          match result {
            Ok(videos) if videos.is_empty() => {
              self.playlist.videos = videos;
              self.playlist.list_state.select(None);
              self.playlist.notice = Some(PLAYLIST_EMPTY_NOTICE.to_string());
            }
            Ok(videos) => {
              info!(count = videos.len(), "playlist: loaded");
              self.playlist.videos = videos;
              self.playlist.list_state.select(Some(0));
              self.trigger_thumb_prefetch();
            }
            Err(e) => {
              warn!(err = %e, "playlist: fetch failed");
              // Previously loaded videos stay visible under the banner.
              self.playlist.error = Some(e.to_string());
            }
          }
          self.playlist.loading = false;
        }
        Err(oneshot::error::TryRecvError::Empty) => {
          self.tasks.videos_rx = Some(rx);
        }
        Err(oneshot::error::TryRecvError::Closed) => {
          self.playlist.loading = false;
          self.playlist.error = Some("Playlist fetch task failed.".to_string());
        }
      }
    }

    if let Some(mut rx) = self.tasks.search_rx.take() {
      match rx.try_recv() {
        Ok(result) => {
          match result {
            Ok(summary) => {
              info!(added = summary.added, skipped = summary.skipped, errors = summary.errors, "search: completed");
              self.search.added_state.select(if summary.videos.is_empty() { None } else { Some(0) });
              self.search.summary = Some(summary);
              // Ready for the next query; the count is kept as a convenience.
              self.search.keywords.clear();
              self.search.cursor = 0;
              self.search.scroll = 0;
            }
            Err(e) => {
              warn!(err = %e, "search: failed");
              self.search.error = Some(e.to_string());
            }
          }
          self.search.loading = false;
        }
        Err(oneshot::error::TryRecvError::Empty) => {
          self.tasks.search_rx = Some(rx);
        }
        Err(oneshot::error::TryRecvError::Closed) => {
          self.search.loading = false;
          self.search.error = Some("Search task failed.".to_string());
        }
      }
    }

    // Drain progressively arriving thumbnails into the cache.
    if let Some(ref mut rx) = self.tasks.thumbs_rx {
      loop {
        match rx.try_recv() {
          Ok((id, image)) => {
            self.thumbs.insert(id, image);
          }
          Err(mpsc::error::TryRecvError::Empty) => break,
          Err(mpsc::error::TryRecvError::Disconnected) => {
            self.tasks.thumbs_rx = None;
            break;
          }
        }
      }
    }
  }

  // --- Thumbnail prefetch ---

  /// Fetch card thumbnails in the background with bounded concurrency,
  /// delivering each decoded image as soon as it's ready. Only fills the
  /// image cache; playlist state is never touched from here.
  fn trigger_thumb_prefetch(&mut self) {
    if let Some(handle) = self.tasks.thumbs_handle.take() {
      handle.abort();
    }
    self.tasks.thumbs_rx = None;

    let pending: Vec<(String, String)> = self
      .playlist
      .videos
      .iter()
      .filter(|v| !v.thumbnail.is_empty() && !self.thumbs.contains_key(&v.id))
      .map(|v| (v.id.clone(), v.thumbnail.clone()))
      .collect();
    if pending.is_empty() {
      return;
    }
    debug!(count = pending.len(), "thumbnails: prefetch start");

    let client = self.api.http();
    let concurrency = constants().thumb_prefetch_concurrency;
    let (tx, rx) = mpsc::channel(16);
    let handle = tokio::spawn(async move {
      use futures::stream::{self, StreamExt};

      stream::iter(pending)
        .map(|(id, url)| {
          let client = client.clone();
          let tx = tx.clone();
          async move {
            match fetch_thumbnail(&client, &url).await {
              Ok(image) => {
                let _ = tx.send((id, image)).await;
              }
              Err(e) => debug!(err = %e, url = %url, "thumbnails: fetch failed"),
            }
          }
        })
        .buffer_unordered(concurrency)
        .collect::<()>()
        .await;
    });
    self.tasks.thumbs_rx = Some(rx);
    self.tasks.thumbs_handle = Some(handle);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::AddedVideo;
  use reqwest::StatusCode;
  use serde_json::json;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn test_app() -> App {
    App::new(ApiClient::new("http://localhost:8000"), RenderMode::Ascii)
  }

  fn video(id: &str, title: &str) -> Video {
    Video {
      id: id.to_string(),
      title: title.to_string(),
      url: format!("https://youtube.com/watch?v={}", id),
      thumbnail: String::new(),
    }
  }

  fn summary(added: u32) -> SearchSummary {
    SearchSummary { added, skipped: 0, errors: 0, videos: Vec::new() }
  }

  // --- max_results control ---

  #[test]
  fn max_results_set_clamps_to_bounds() {
    let mut pane = SearchPane::default();
    pane.set_max_results(0);
    assert_eq!(pane.max_results, 1);
    pane.set_max_results(200);
    assert_eq!(pane.max_results, 50);
    pane.set_max_results(25);
    assert_eq!(pane.max_results, 25);
  }

  #[test]
  fn max_results_round_trips_through_both_controls() {
    // Slider nudges and digit entry mutate one field; every in-range
    // value survives either path unchanged.
    let mut pane = SearchPane::default();
    for v in 1..=50u8 {
      pane.set_max_results(v);
      pane.nudge_max_results(0);
      assert_eq!(pane.max_results, v);
    }
    pane.set_max_results(1);
    pane.nudge_max_results(-1);
    assert_eq!(pane.max_results, 1);
    pane.set_max_results(50);
    pane.nudge_max_results(5);
    assert_eq!(pane.max_results, 50);
  }

  #[test]
  fn max_results_digit_entry() {
    let mut pane = SearchPane::default();
    pane.set_max_results(3);
    pane.push_max_results_digit(5);
    assert_eq!(pane.max_results, 35);
    // Out of range: restart entry with the new digit.
    pane.push_max_results_digit(9);
    assert_eq!(pane.max_results, 9);
    pane.pop_max_results_digit();
    assert_eq!(pane.max_results, 1);
  }

  #[test]
  fn search_field_tab_order_skips_added_without_results() {
    let mut pane = SearchPane::default();
    assert_eq!(pane.field, SearchField::Keywords);
    pane.next_field();
    assert_eq!(pane.field, SearchField::MaxResults);
    pane.next_field();
    assert_eq!(pane.field, SearchField::Keywords);

    pane.summary = Some(SearchSummary {
      added: 1,
      skipped: 0,
      errors: 0,
      videos: vec![AddedVideo { title: "t".to_string(), channel: "c".to_string() }],
    });
    pane.next_field();
    pane.next_field();
    assert_eq!(pane.field, SearchField::Added);
    pane.next_field();
    assert_eq!(pane.field, SearchField::Keywords);
  }

  // --- submission gating ---

  #[test]
  fn blank_keywords_never_issue_a_request() {
    let mut app = test_app();
    for blank in ["", "   ", "\t \n"] {
      app.search.keywords = blank.to_string();
      app.trigger_search_add();
      assert!(app.tasks.search_rx.is_none());
      assert!(!app.search.loading);
      assert!(app.search.error.is_none());
      assert!(!app.search.can_submit());
    }
  }

  // --- playlist completion arms ---

  #[test]
  fn playlist_success_replaces_wholesale_and_selects_first() {
    let mut app = test_app();
    app.playlist.videos = vec![video("old", "Old")];
    app.playlist.loading = true;

    let (tx, rx) = oneshot::channel();
    app.tasks.videos_rx = Some(rx);
    tx.send(Ok(vec![video("a", "A"), video("b", "B"), video("c", "C")])).unwrap();

    app.check_pending();
    assert_eq!(app.playlist.videos.len(), 3);
    assert_eq!(app.playlist.videos[0].id, "a");
    assert_eq!(app.playlist.list_state.selected(), Some(0));
    assert!(!app.playlist.loading);
    assert!(app.playlist.error.is_none());
  }

  #[test]
  fn empty_playlist_sets_notice_not_error() {
    let mut app = test_app();
    app.playlist.loading = true;

    let (tx, rx) = oneshot::channel();
    app.tasks.videos_rx = Some(rx);
    tx.send(Ok(Vec::new())).unwrap();

    app.check_pending();
    assert!(app.playlist.videos.is_empty());
    assert_eq!(app.playlist.notice.as_deref(), Some(PLAYLIST_EMPTY_NOTICE));
    assert!(app.playlist.error.is_none());
    assert!(!app.playlist.loading);
  }

  #[test]
  fn failed_fetch_preserves_previous_videos_under_banner() {
    let mut app = test_app();
    app.playlist.videos = vec![video("a", "A"), video("b", "B")];
    app.playlist.loading = true;

    let (tx, rx) = oneshot::channel();
    app.tasks.videos_rx = Some(rx);
    tx.send(Err(ApiError::Status {
      status: StatusCode::INTERNAL_SERVER_ERROR,
      message: crate::api::PLAYLIST_FETCH_FAILED.to_string(),
    }))
    .unwrap();

    app.check_pending();
    assert_eq!(app.playlist.videos.len(), 2);
    assert_eq!(app.playlist.error.as_deref(), Some(crate::api::PLAYLIST_FETCH_FAILED));
    assert!(!app.playlist.loading);
  }

  #[test]
  fn dropped_fetch_task_clears_loading() {
    let mut app = test_app();
    app.playlist.loading = true;

    let (tx, rx) = oneshot::channel::<VideosResult>();
    app.tasks.videos_rx = Some(rx);
    drop(tx);

    app.check_pending();
    assert!(!app.playlist.loading);
    assert!(app.playlist.error.is_some());
  }

  // --- search completion arms ---

  #[test]
  fn search_success_resets_keywords_and_keeps_max_results() {
    let mut app = test_app();
    app.search.keywords = "rap gasy".to_string();
    app.search.cursor = 8;
    app.search.max_results = 17;
    app.search.loading = true;

    let (tx, rx) = oneshot::channel();
    app.tasks.search_rx = Some(rx);
    tx.send(Ok(summary(4))).unwrap();

    app.check_pending();
    assert_eq!(app.search.summary.as_ref().unwrap().added, 4);
    assert!(app.search.keywords.is_empty());
    assert_eq!(app.search.cursor, 0);
    assert_eq!(app.search.max_results, 17);
    assert!(!app.search.loading);
  }

  #[test]
  fn search_failure_surfaces_message_and_clears_loading() {
    let mut app = test_app();
    app.search.loading = true;

    let (tx, rx) = oneshot::channel();
    app.tasks.search_rx = Some(rx);
    tx.send(Err(ApiError::Status { status: StatusCode::BAD_REQUEST, message: "No keywords given".to_string() }))
      .unwrap();

    app.check_pending();
    assert_eq!(app.search.error.as_deref(), Some("No keywords given"));
    assert!(app.search.summary.is_none());
    assert!(!app.search.loading);
  }

  #[test]
  fn stale_search_response_is_discarded() {
    let mut app = test_app();
    app.search.loading = true;

    // First submission pending...
    let (tx1, rx1) = oneshot::channel();
    app.tasks.search_rx = Some(rx1);
    // ...then a second submission replaces the receiver, exactly as
    // trigger_search_add does.
    let (tx2, rx2) = oneshot::channel();
    app.tasks.search_rx = Some(rx2);

    // The first request resolves late: its channel is already gone.
    assert!(tx1.send(Ok(summary(1))).is_err());
    tx2.send(Ok(summary(2))).unwrap();

    app.check_pending();
    assert_eq!(app.search.summary.as_ref().unwrap().added, 2);
  }

  // --- router ---

  #[test]
  fn entering_search_resets_the_form() {
    let mut app = test_app();
    app.go_to_search();
    app.search.keywords = "half-typed".to_string();
    app.search.max_results = 9;
    app.search.summary = Some(summary(3));
    app.go_home();
    assert_eq!(app.screen, Screen::Home);
    app.go_to_search();
    assert_eq!(app.screen, Screen::Search);
    assert!(app.search.keywords.is_empty());
    assert_eq!(app.search.max_results, constants().default_max_results);
    assert!(app.search.summary.is_none());
  }

  #[test]
  fn leaving_search_orphans_inflight_request() {
    let mut app = test_app();
    app.go_to_search();
    let (tx, rx) = oneshot::channel();
    app.tasks.search_rx = Some(rx);
    app.go_home();
    assert!(app.tasks.search_rx.is_none());
    assert!(tx.send(Ok(summary(1))).is_err());
  }

  // --- end to end against a mock server ---

  #[tokio::test]
  async fn submit_search_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/search-and-add"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "added": 2,
        "skipped": 1,
        "videos": [{ "title": "Tsy Ho Bado", "channel": "Cyphaka" }]
      })))
      .mount(&server)
      .await;

    let mut app = App::new(ApiClient::new(server.uri()), RenderMode::Ascii);
    app.go_to_search();
    app.search.keywords = "  rap gasy  ".to_string();
    app.trigger_search_add();
    assert!(app.search.loading);

    for _ in 0..100 {
      app.check_pending();
      if app.search.summary.is_some() || app.search.error.is_some() {
        break;
      }
      tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let summary = app.search.summary.expect("search should have resolved");
    assert_eq!(summary.added, 2);
    assert_eq!(summary.errors, 0);
    assert!(app.search.keywords.is_empty());
    assert!(!app.search.loading);
  }

  #[tokio::test]
  async fn refresh_is_noop_while_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/videos"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "videos": [] })))
      .mount(&server)
      .await;

    let mut app = App::new(ApiClient::new(server.uri()), RenderMode::Ascii);
    app.trigger_refresh();
    assert!(app.playlist.loading);
    let first_rx_present = app.tasks.videos_rx.is_some();
    app.trigger_refresh();
    assert!(first_rx_present && app.tasks.videos_rx.is_some());

    for _ in 0..100 {
      app.check_pending();
      if !app.playlist.loading {
        break;
      }
      tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(app.playlist.notice.as_deref(), Some(PLAYLIST_EMPTY_NOTICE));
  }
}
