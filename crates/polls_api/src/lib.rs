//! Client for the hosted polls API. Every request is bounded by the
//! configured timeout and never retried.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.pollsapi.com/v1/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct PollsApiConfig {
    pub base_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

impl PollsApiConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, PollsApiError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// `base_url` is treated as a directory so relative endpoints append to
    /// it instead of replacing its last segment.
    pub fn with_base_url(
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, PollsApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }
}

#[derive(Debug, Error)]
pub enum PollsApiError {
    #[error("invalid polls api url: {0}")]
    Url(#[from] url::ParseError),
    #[error("polls api request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("`{id}` is not a usable poll id")]
    InvalidPollId { id: String },
    #[error("polls api returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: String,
    pub status_code: u16,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub options: Vec<PollOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub poll_id: String,
    pub text: String,
    #[serde(default)]
    pub votes_count: u64,
    #[serde(default)]
    pub data: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
struct CreatePollRequest<'a> {
    question: &'a str,
    options: Vec<NewOption<'a>>,
}

#[derive(Debug, Serialize)]
struct NewOption<'a> {
    text: &'a str,
}

#[derive(Clone)]
pub struct PollsApiClient {
    http: Client,
    config: PollsApiConfig,
}

impl PollsApiClient {
    pub fn new(config: PollsApiConfig) -> Result<Self, PollsApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub async fn create_poll(
        &self,
        question: &str,
        options: &[String],
    ) -> Result<Poll, PollsApiError> {
        let url = self.endpoint(["create", "poll"])?;
        debug!(%url, options = options.len(), "creating poll");
        let body = CreatePollRequest {
            question,
            options: options.iter().map(|text| NewOption { text }).collect(),
        };
        let response = self
            .http
            .post(url)
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;
        read::<ApiResponse<Poll>>(response).await.map(|r| r.data)
    }

    pub async fn get_poll(&self, id: &str) -> Result<Poll, PollsApiError> {
        if matches!(id, "" | "." | "..") {
            return Err(PollsApiError::InvalidPollId { id: id.to_string() });
        }
        let url = self.endpoint(["get", "poll", id])?;
        debug!(%url, "fetching poll");
        let response = self
            .http
            .get(url)
            .header("api-key", &self.config.api_key)
            .send()
            .await?;
        read::<ApiResponse<Poll>>(response).await.map(|r| r.data)
    }

    /// Appends `segments` to the base url, percent-encoding each one so a
    /// segment can never add path levels or a query.
    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, PollsApiError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, PollsApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PollsApiError::Status { status, body });
    }
    Ok(response.json().await?)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
