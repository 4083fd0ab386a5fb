//! Shared HTTP plumbing for source adapters.

use std::time::Duration;

use reqwest::Client;

use crate::error::SourceError;

/// HTTP behavior shared by all source adapters.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Maximum number of retry attempts after the first failure.
    pub max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub backoff_base_secs: u64,
}

impl HttpSettings {
    /// Builds the underlying `reqwest::Client` with configured timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the client cannot be constructed
    /// (e.g., invalid TLS config).
    pub(crate) fn build_client(&self) -> Result<Client, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&self.user_agent)
            .build()?;
        Ok(client)
    }
}

/// Triages a response status into the adapter error taxonomy.
///
/// Returns the response untouched on 2xx so the caller can consume the body.
///
/// # Errors
///
/// - [`SourceError::RateLimited`] — HTTP 429, `Retry-After` honored when parseable.
/// - [`SourceError::NotFound`] — HTTP 404.
/// - [`SourceError::UnexpectedStatus`] — any other non-2xx status.
pub(crate) fn ensure_success(
    provider: &str,
    url: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(SourceError::RateLimited {
            provider: provider.to_owned(),
            retry_after_secs,
        });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response)
}

/// Parses a response body as JSON with a typed error carrying context.
///
/// # Errors
///
/// - [`SourceError::Http`] — body read failure.
/// - [`SourceError::Deserialize`] — body is not valid JSON for `T`.
pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    context: &str,
    response: reqwest::Response,
) -> Result<T, SourceError> {
    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| SourceError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
