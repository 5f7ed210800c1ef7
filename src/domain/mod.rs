//! Domain models - core business types
//!
//! This module contains the canonical data types used on both sides of the
//! gatekeeper wire contract:
//! - `MailAllowanceStatus` - the answer to an allowance check
//! - `EmailRequest` - the `/isAllowed` request payload
//! - `reason` - well-known reason values returned by the service

pub mod types;

// Re-export commonly used types at module level
pub use types::{EmailRequest, MailAllowanceStatus};
