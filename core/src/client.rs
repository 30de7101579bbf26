//! Stateless HTTP request builder and response parser for the REST API.
//!
//! # Design
//! `GitHubClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Every endpoint is a `build_*` call that produces an
//! `HttpRequest` followed by a `parse_*` call that consumes the matching
//! `HttpResponse`. The caller, usually through a `Transport`, executes the
//! round-trip in between, which keeps the core deterministic and free of I/O.
//!
//! Endpoint glue supplies paths relative to the API root; query options go
//! through `pagination::apply`, stubbed listings through
//! `pagination::resolve_path`, and review submissions through the
//! comment-style validator before a body is ever serialized.

use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::pagination;
use crate::review::PullRequestReviewRequest;

/// Default media type for every request.
pub const MEDIA_TYPE_V3: &str = "application/vnd.github.v3+json";

/// Opt-in for `side`/`line` addressing of review comments.
pub const MEDIA_TYPE_COMFORT_FADE_PREVIEW: &str = "application/vnd.github.comfort-fade-preview+json";

/// Synchronous, stateless client for the REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    config: ClientConfig,
}

impl GitHubClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_get(&self, path: &str) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Get, path, None)
    }

    /// Build a GET for a list endpoint, adding one query parameter per
    /// present option.
    pub fn build_list<O: Serialize + ?Sized>(
        &self,
        path: &str,
        options: Option<&O>,
    ) -> Result<HttpRequest, ApiError> {
        let req = self.request(HttpMethod::Get, path, None)?;
        pagination::apply(req, options)
    }

    /// Like `build_list`, for endpoints that also serve a stubbed variant.
    /// The variant is picked by `ClientConfig::stubbed`.
    pub fn build_listing<O: Serialize + ?Sized>(
        &self,
        path: &str,
        options: Option<&O>,
    ) -> Result<HttpRequest, ApiError> {
        let path = pagination::resolve_path(path, self.config.stubbed);
        self.build_list(&path, options)
    }

    pub fn build_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Post, path, Some(to_json(body)?))
    }

    pub fn build_patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Patch, path, Some(to_json(body)?))
    }

    pub fn build_put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Put, path, Some(to_json(body)?))
    }

    pub fn build_delete(&self, path: &str) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Delete, path, None)
    }

    /// Build a POST creating or submitting a review.
    ///
    /// The comment batch is validated first; a mixed batch fails with
    /// `ApiError::MixedCommentStyles` and no request is produced. Line-style
    /// batches carry the comfort-fade preview media type.
    pub fn build_create_review(
        &self,
        path: &str,
        review: &PullRequestReviewRequest,
    ) -> Result<HttpRequest, ApiError> {
        let line_style = review.uses_line_style()?;
        let mut req = self.build_post(path, review)?;
        if line_style {
            req.set_header("accept", MEDIA_TYPE_COMFORT_FADE_PREVIEW);
        }
        Ok(req)
    }

    /// Decode a list response. A `null` body yields an empty list.
    pub fn parse_list<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Vec<T>, ApiError> {
        check_status(&response)?;
        let items: Option<Vec<T>> = decode(response.body.as_bytes())?;
        Ok(items.unwrap_or_default())
    }

    pub fn parse_one<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        decode(response.body.as_bytes())
    }

    /// Check a response whose body carries nothing of interest.
    pub fn parse_empty(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> Result<HttpRequest, ApiError> {
        let url = self.endpoint(path)?;
        let mut headers = vec![
            ("accept".to_string(), MEDIA_TYPE_V3.to_string()),
            ("user-agent".to_string(), self.config.user_agent.clone()),
        ];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        debug!("built {} {}", method.as_str(), url);
        Ok(HttpRequest {
            method,
            path: url,
            headers,
            body,
        })
    }

    fn endpoint(&self, path: &str) -> Result<String, ApiError> {
        let raw = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&raw)?.into())
    }
}

/// Decode a JSON body into `T`, reporting bad timestamps as
/// `ApiError::MalformedTimestamp`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    trace!("decoding {} byte body", body.len());
    serde_json::from_slice(body).map_err(ApiError::from_decode)
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
