use anyhow::{Context, anyhow};
use image::DynamicImage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::constants;

/// Fallback message when the videos endpoint answers with a failure status.
/// That endpoint reports errors without a body worth reading.
pub const PLAYLIST_FETCH_FAILED: &str = "Failed to retrieve the playlist.";

/// Fallback message when search-and-add fails without a `detail` field.
pub const SEARCH_FAILED: &str = "Search request failed.";

/// A playlist entry as served by the collection endpoint. Immutable once
/// received — the client never edits records locally.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
  pub id: String,
  pub title: String,
  pub url: String,
  #[serde(default)]
  pub thumbnail: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
  /// An absent `videos` field means an empty playlist, not an error.
  #[serde(default)]
  videos: Vec<Video>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
  keywords: &'a str,
  max_results: u32,
}

/// Outcome of one search-and-add request: counts plus the items that were
/// actually added to the playlist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchSummary {
  pub added: u32,
  pub skipped: u32,
  #[serde(default)]
  pub errors: u32,
  #[serde(default)]
  pub videos: Vec<AddedVideo>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddedVideo {
  pub title: String,
  #[serde(default)]
  pub channel: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  detail: String,
}

/// What went wrong talking to the playlist server.
///
/// `Status` carries the user-facing message (the server's `detail` where
/// the endpoint reads it, a generic string otherwise); `Transport` covers
/// requests that never completed or bodies that failed to decode.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{message}")]
  Status { status: StatusCode, message: String },
  #[error("{0}")]
  Transport(#[from] reqwest::Error),
}

/// Thin client over the playlist server's HTTP API.
#[derive(Clone)]
pub struct ApiClient {
  http: Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url = base_url.into();
    Self { http: Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
  }

  /// The underlying HTTP client, shared with thumbnail fetches.
  pub fn http(&self) -> Client {
    self.http.clone()
  }

  /// Fetch the curated playlist, in server-provided display order.
  pub async fn fetch_videos(&self) -> Result<Vec<Video>, ApiError> {
    let url = format!("{}{}", self.base_url, constants().videos_path);
    let response = self.http.get(&url).send().await?;
    if !response.status().is_success() {
      return Err(ApiError::Status { status: response.status(), message: PLAYLIST_FETCH_FAILED.to_string() });
    }
    let body: VideosResponse = response.json().await?;
    Ok(body.videos)
  }

  /// Submit a search-and-add request. On a non-success status the server's
  /// `detail` message is surfaced verbatim when present.
  pub async fn search_and_add(&self, keywords: &str, max_results: u32) -> Result<SearchSummary, ApiError> {
    let url = format!("{}{}", self.base_url, constants().search_path);
    let response = self.http.post(&url).json(&SearchRequest { keywords, max_results }).send().await?;
    let status = response.status();
    if !status.is_success() {
      let detail = response.json::<ErrorBody>().await.ok().map(|body| body.detail);
      return Err(ApiError::Status { status, message: detail.unwrap_or_else(|| SEARCH_FAILED.to_string()) });
    }
    Ok(response.json().await?)
  }
}

/// Fetch and decode a card thumbnail for the preview pane.
pub async fn fetch_thumbnail(client: &Client, url: &str) -> anyhow::Result<DynamicImage> {
  let response = client.get(url).send().await.with_context(|| format!("Failed to request thumbnail {}", url))?;
  if !response.status().is_success() {
    return Err(anyhow!("Thumbnail request returned {} ({})", response.status(), url));
  }
  let bytes = response.bytes().await.with_context(|| format!("Failed to read image bytes from {}", url))?;
  let image = image::load_from_memory(&bytes).with_context(|| format!("Failed to decode image from {}", url))?;
  Ok(image)
}
