//! Gatekeeper HTTP client
//!
//! Asks the remote gatekeeper service whether an email address is allowed
//! to register or log in. One POST per call, no retries, no caching.
//!
//! Outcome mapping:
//! - Any HTTP response (any status code) resolves to a `MailAllowanceStatus`
//! - A request that exceeds the configured deadline resolves to the
//!   `timeout` status, it does not error
//! - Every other transport failure is returned as an error, unwrapped

use crate::domain::types::{EmailRequest, MailAllowanceStatus};
use crate::infra::config::Configuration;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Failures surfaced to the caller as errors.
///
/// Timeouts are deliberately absent: they resolve to the `timeout` status.
#[derive(Debug, Error)]
pub enum GateKeeperError {
    /// The configured base URL could not be parsed.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    /// Transport-level failure other than the request deadline
    /// (DNS, connection refused, TLS).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub struct GateKeeperClient {
    configuration: Configuration,
    http_client: reqwest::Client,
}

impl GateKeeperClient {
    /// Create a client holding the configuration for its lifetime.
    ///
    /// The base URL is not validated here; a malformed URL surfaces on the
    /// first call.
    pub fn new(configuration: &Configuration) -> Self {
        Self { configuration: configuration.clone(), http_client: reqwest::Client::new() }
    }

    /// Build the request URL: scheme, host and port from the base URL with
    /// the path forced to `/isAllowed`. Any path or query present in the
    /// base URL is discarded.
    fn request_url(base_url: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(base_url)?;
        url.set_path("/isAllowed");
        url.set_query(None);
        Ok(url)
    }

    /// Check whether `email` may register or log in.
    ///
    /// Exactly one request is attempted. The email is sent as-is; format
    /// validation is the service's responsibility.
    pub async fn is_allowed_email(
        &self,
        email: &str,
    ) -> Result<MailAllowanceStatus, GateKeeperError> {
        let url = Self::request_url(&self.configuration.base_url)?;
        let timeout = Duration::from_millis(self.configuration.timeout_ms);

        let response = self
            .http_client
            .post(url)
            .timeout(timeout)
            .header("Authorization", format!("Bearer {}", self.configuration.token))
            .json(&EmailRequest { email: email.to_string() })
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Ok(MailAllowanceStatus::timed_out()),
            Err(e) => return Err(e.into()),
        };

        let is_allowed = response.status() == reqwest::StatusCode::OK;

        // Body is opaque text, never parsed as JSON. The deadline covers
        // the body read as well.
        let reason = match response.text().await {
            Ok(text) => text,
            Err(e) if e.is_timeout() => return Ok(MailAllowanceStatus::timed_out()),
            Err(e) => return Err(e.into()),
        };

        Ok(MailAllowanceStatus { is_allowed, reason })
    }
}
