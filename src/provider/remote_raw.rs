//! Remote raw tier: one GET against the raw-content host.

use super::http::{join_segments, parse_base_url};
use super::{ResolutionOutcome, SourceProvider};
use crate::config::RemoteCoordinates;
use crate::error::ApiError;
use crate::registry::EntityDescriptor;
use crate::resolver::DataRequest;
use crate::types::{RemoteUrls, SourceTag, REMOTE_RAW};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

pub struct RemoteRawProvider {
    client: reqwest::Client,
    coordinates: RemoteCoordinates,
    base_url: Url,
}

impl RemoteRawProvider {
    /// Fails only on a malformed base URL, which is a configuration defect.
    pub fn new(client: reqwest::Client, coordinates: RemoteCoordinates) -> Result<Self, ApiError> {
        let base_url = parse_base_url("raw_base_url", &coordinates.raw_base_url)?;
        Ok(Self {
            client,
            coordinates,
            base_url,
        })
    }

    /// `<raw_base>/<owner>/<repository>/<branch>/<base_path>/<folder>/<file>`
    pub fn file_url(&self, remote_folder: &str, filename: &str) -> Result<Url, String> {
        let c = &self.coordinates;
        let segments = [c.owner.as_str(), c.repository.as_str()]
            .into_iter()
            .map(str::to_string)
            .chain(
                c.branch
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            )
            .chain(c.file_segments(remote_folder, filename));
        join_segments(&self.base_url, segments)
    }
}

#[async_trait]
impl SourceProvider for RemoteRawProvider {
    fn tier(&self) -> &'static str {
        REMOTE_RAW
    }

    async fn attempt(
        &self,
        request: &DataRequest,
        entity: &EntityDescriptor,
    ) -> ResolutionOutcome {
        if !self.coordinates.is_configured() {
            return ResolutionOutcome::soft_failure("remote coordinates not configured");
        }

        let url = match self.file_url(&entity.remote_folder, &request.logical_filename) {
            Ok(url) => url,
            Err(e) => return ResolutionOutcome::soft_failure(e),
        };
        debug!(url = %url, "Fetching raw remote content");

        let response = match self.client.get(url.clone()).send().await {
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

        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) => {
                return ResolutionOutcome::soft_failure(format!(
                    "failed to read body from {}: {}",
                    url, e
                ))
            }
        };

        match request.parse(raw) {
            Ok(data) => ResolutionOutcome::success_with_urls(
                data,
                SourceTag::RemoteRaw,
                RemoteUrls {
                    raw: Some(url.to_string()),
                    ..RemoteUrls::default()
                },
            ),
            Err(e) => ResolutionOutcome::soft_failure(format!("failed to parse {}: {}", url, e)),
        }
    }
}
