//! Email allowance decision engine
//!
//! Pure decision logic behind `POST /isAllowed`: bearer token check, email
//! format validation, then exact-mail and domain allow-list lookups. No IO.

use crate::domain::types::reason;
use crate::infra::config::ServerConfig;
use hyper::StatusCode;
use validator::ValidateEmail;

/// Outcome handed to the HTTP layer: status code plus plain-text reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub status: StatusCode,
    pub reason: &'static str,
}

impl Decision {
    fn new(status: StatusCode, reason: &'static str) -> Self {
        Self { status, reason }
    }
}

pub struct AllowanceService {
    config: ServerConfig,
}

impl AllowanceService {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Decide whether `email` may register or log in.
    ///
    /// `authorization` is the raw `Authorization` header value if present;
    /// `email` is the submitted address if the request body was readable.
    /// Checks run in order: token, email format, exact mail, domain.
    pub fn evaluate(&self, authorization: Option<&str>, email: Option<&str>) -> Decision {
        let Some(authorization) = authorization else {
            return Decision::new(StatusCode::UNAUTHORIZED, reason::NO_TOKEN);
        };

        if authorization != format!("Bearer {}", self.config.token()) {
            return Decision::new(StatusCode::UNAUTHORIZED, reason::INVALID_TOKEN);
        }

        // An unreadable body counts as an invalid email: nothing usable
        // was presented.
        let Some(email) = email else {
            return Decision::new(StatusCode::BAD_REQUEST, reason::INVALID_EMAIL_FORMAT);
        };

        if !email.validate_email() {
            return Decision::new(StatusCode::BAD_REQUEST, reason::INVALID_EMAIL_FORMAT);
        }

        // Allow-lists are stored lowercase; match case-insensitively
        let email = email.to_lowercase();
        if self.config.allowed_mails().iter().any(|m| m == &email) {
            return Decision::new(StatusCode::OK, reason::EMAIL_ALLOWED);
        }

        let domain = email.split('@').next_back().unwrap_or("");
        if self.config.allowed_domains().iter().any(|d| d == domain) {
            return Decision::new(StatusCode::OK, reason::DOMAIN_ALLOWED);
        }

        Decision::new(StatusCode::FORBIDDEN, reason::NOT_ALLOWED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AllowanceService {
        let config =
            ServerConfig::new("secret", &["vip@other.net"], &["example.com", "allowed.org"]);
        AllowanceService::new(config)
    }

    fn bearer() -> Option<&'static str> {
        Some("Bearer secret")
    }

    #[test]
    fn missing_header_is_no_token() {
        let decision = service().evaluate(None, Some("user@example.com"));
        assert_eq!(decision.status, StatusCode::UNAUTHORIZED);
        assert_eq!(decision.reason, reason::NO_TOKEN);
    }

    #[test]
    fn wrong_token_is_invalid_token() {
        let decision = service().evaluate(Some("Bearer wrong"), Some("user@example.com"));
        assert_eq!(decision.status, StatusCode::UNAUTHORIZED);
        assert_eq!(decision.reason, reason::INVALID_TOKEN);
    }

    #[test]
    fn non_bearer_scheme_is_invalid_token() {
        let decision = service().evaluate(Some("Basic c2VjcmV0"), Some("user@example.com"));
        assert_eq!(decision.status, StatusCode::UNAUTHORIZED);
        assert_eq!(decision.reason, reason::INVALID_TOKEN);
    }

    #[test]
    fn missing_email_is_invalid_format() {
        let decision = service().evaluate(bearer(), None);
        assert_eq!(decision.status, StatusCode::BAD_REQUEST);
        assert_eq!(decision.reason, reason::INVALID_EMAIL_FORMAT);
    }

    #[test]
    fn malformed_email_is_invalid_format() {
        let decision = service().evaluate(bearer(), Some("not-an-email"));
        assert_eq!(decision.status, StatusCode::BAD_REQUEST);
        assert_eq!(decision.reason, reason::INVALID_EMAIL_FORMAT);
    }

    #[test]
    fn exact_mail_match_is_email_allowed() {
        let decision = service().evaluate(bearer(), Some("vip@other.net"));
        assert_eq!(decision.status, StatusCode::OK);
        assert_eq!(decision.reason, reason::EMAIL_ALLOWED);
    }

    #[test]
    fn mail_match_is_case_insensitive() {
        let decision = service().evaluate(bearer(), Some("VIP@Other.NET"));
        assert_eq!(decision.status, StatusCode::OK);
        assert_eq!(decision.reason, reason::EMAIL_ALLOWED);
    }

    #[test]
    fn domain_match_is_domain_allowed() {
        let decision = service().evaluate(bearer(), Some("anyone@Example.COM"));
        assert_eq!(decision.status, StatusCode::OK);
        assert_eq!(decision.reason, reason::DOMAIN_ALLOWED);
    }

    #[test]
    fn unlisted_email_is_not_allowed() {
        let decision = service().evaluate(bearer(), Some("user@denied.io"));
        assert_eq!(decision.status, StatusCode::FORBIDDEN);
        assert_eq!(decision.reason, reason::NOT_ALLOWED);
    }

    #[test]
    fn token_check_runs_before_email_validation() {
        let decision = service().evaluate(Some("Bearer wrong"), Some("not-an-email"));
        assert_eq!(decision.reason, reason::INVALID_TOKEN);
    }
}
