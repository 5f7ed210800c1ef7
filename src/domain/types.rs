//! Shared types for the mail gatekeeper

use serde::{Deserialize, Serialize};

/// Well-known `reason` values returned by the gatekeeper service.
///
/// These are documentation, not a closed enumeration: the service may return
/// any text and clients pass it through verbatim.
pub mod reason {
    /// No `Authorization` header was present.
    pub const NO_TOKEN: &str = "no_token";
    /// The bearer token did not match the configured token.
    pub const INVALID_TOKEN: &str = "invalid_token";
    /// The submitted email is not syntactically valid.
    pub const INVALID_EMAIL_FORMAT: &str = "invalid_email_format";
    /// The exact email address is on the allow-list.
    pub const EMAIL_ALLOWED: &str = "email_allowed";
    /// The email's domain is on the allow-list.
    pub const DOMAIN_ALLOWED: &str = "domain_allowed";
    /// Neither the email nor its domain is allowed.
    pub const NOT_ALLOWED: &str = "not_allowed";
    /// The request deadline elapsed before the service answered.
    /// Produced client-side, never sent over the wire.
    pub const TIMEOUT: &str = "timeout";
}

/// Outcome of an email allowance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailAllowanceStatus {
    /// Whether the email is allowed to register and log in.
    pub is_allowed: bool,
    /// Free-text reason from the service, verbatim. See [`reason`] for the
    /// well-known values.
    pub reason: String,
}

impl MailAllowanceStatus {
    /// Status returned when the request deadline elapsed.
    pub(crate) fn timed_out() -> Self {
        Self { is_allowed: false, reason: reason::TIMEOUT.to_string() }
    }
}

/// Request payload for `POST /isAllowed`. Exactly one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}
