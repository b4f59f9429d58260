//! Shared HTTP client for the remote tiers.

use crate::error::ApiError;

pub const USER_AGENT: &str = concat!("tiered-data/", env!("CARGO_PKG_VERSION"));

/// Build the client shared by both remote providers. The structured API
/// rejects requests without a user agent.
pub fn build_client() -> Result<reqwest::Client, ApiError> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// Parse and check a configured base URL.
pub(crate) fn parse_base_url(name: &str, raw: &str) -> Result<url::Url, ApiError> {
    let url = url::Url::parse(raw.trim())
        .map_err(|e| ApiError::ConfigError(format!("Invalid {} '{}': {}", name, raw, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::ConfigError(format!(
            "Invalid {} '{}': expected an http(s) base URL",
            name, raw
        )));
    }
    Ok(url)
}

/// Append path segments to a base URL, percent-encoding each one.
pub(crate) fn join_segments<I, S>(base: &url::Url, segments: I) -> Result<url::Url, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| format!("cannot append path to {}", base))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment.as_ref());
        }
    }
    Ok(url)
}
