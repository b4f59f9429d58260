//! Remote structured-API tier.
//!
//! Fetches `/repos/{owner}/{repo}/contents/{path}?ref={branch}` and expects a
//! JSON envelope with `type = "file"` and base64 `content`. Used when the raw
//! host refuses (private repositories, different auth requirements).

use super::http::{join_segments, parse_base_url};
use super::{ResolutionOutcome, SourceProvider};
use crate::config::RemoteCoordinates;
use crate::error::ApiError;
use crate::registry::EntityDescriptor;
use crate::resolver::DataRequest;
use crate::types::{RemoteUrls, SourceTag, REMOTE_API};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;
use url::Url;

const ACCEPT: &str = "application/vnd.github+json";

/// Contents-API response for a single path.
#[derive(Debug, Deserialize)]
pub struct ContentEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl ContentEnvelope {
    /// Decode the base64 payload into text. Line breaks inside the payload
    /// are ignored.
    pub fn decode(&self) -> Result<String, String> {
        if self.kind != "file" {
            return Err(format!("expected a file, got '{}'", self.kind));
        }
        if let Some(encoding) = self.encoding.as_deref() {
            if encoding != "base64" {
                return Err(format!("unsupported content encoding '{}'", encoding));
            }
        }
        let content = self
            .content
            .as_deref()
            .ok_or_else(|| "file envelope has no content".to_string())?;
        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| format!("invalid base64 content: {}", e))?;
        String::from_utf8(bytes).map_err(|e| format!("content is not UTF-8: {}", e))
    }
}

pub struct RemoteApiProvider {
    client: reqwest::Client,
    coordinates: RemoteCoordinates,
    base_url: Url,
    token: Option<String>,
}

impl RemoteApiProvider {
    /// The bearer token is resolved once here, never per request.
    pub fn new(client: reqwest::Client, coordinates: RemoteCoordinates) -> Result<Self, ApiError> {
        let base_url = parse_base_url("api_base_url", &coordinates.api_base_url)?;
        let token = coordinates.resolved_token();
        Ok(Self {
            client,
            coordinates,
            base_url,
            token,
        })
    }

    /// Drop any token, including one picked up from the environment.
    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn contents_url(&self, remote_folder: &str, filename: &str) -> Result<Url, String> {
        let c = &self.coordinates;
        let segments = ["repos", c.owner.as_str(), c.repository.as_str(), "contents"]
            .into_iter()
            .map(str::to_string)
            .chain(c.file_segments(remote_folder, filename));
        let mut url = join_segments(&self.base_url, segments)?;
        url.query_pairs_mut().append_pair("ref", &c.branch);
        Ok(url)
    }
}

#[async_trait]
impl SourceProvider for RemoteApiProvider {
    fn tier(&self) -> &'static str {
        REMOTE_API
    }

    async fn attempt(
        &self,
        request: &DataRequest,
        entity: &EntityDescriptor,
    ) -> ResolutionOutcome {
        if !self.coordinates.is_configured() {
            return ResolutionOutcome::soft_failure("remote coordinates not configured");
        }

        let url = match self.contents_url(&entity.remote_folder, &request.logical_filename) {
            Ok(url) => url,
            Err(e) => return ResolutionOutcome::soft_failure(e),
        };
        debug!(url = %url, authenticated = self.token.is_some(), "Fetching remote API content");

        let mut builder = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, ACCEPT);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                return ResolutionOutcome::soft_failure(format!(
                    "request to {} failed: {}",
                    url, e
                ))
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ResolutionOutcome::soft_failure(format!("HTTP {} from {}", status, url));
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                return ResolutionOutcome::soft_failure(format!(
                    "invalid JSON envelope from {}: {}",
                    url, e
                ))
            }
        };
        if body.is_array() {
            return ResolutionOutcome::soft_failure(format!(
                "{} is a directory listing, not a file",
                url
            ));
        }

        let envelope: ContentEnvelope = match serde_json::from_value(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                return ResolutionOutcome::soft_failure(format!(
                    "unexpected envelope from {}: {}",
                    url, e
                ))
            }
        };

        let raw = match envelope.decode() {
            Ok(raw) => raw,
            Err(e) => return ResolutionOutcome::soft_failure(format!("{} from {}", e, url)),
        };

        match request.parse(raw) {
            Ok(data) => ResolutionOutcome::success_with_urls(
                data,
                SourceTag::RemoteApi,
                RemoteUrls {
                    raw: envelope.download_url,
                    api: Some(url.to_string()),
                    html: envelope.html_url,
                },
            ),
            Err(e) => ResolutionOutcome::soft_failure(format!("failed to parse {}: {}", url, e)),
        }
    }
}
