//! Mailgate library
//!
//! Client and service for email allowance checks against a gatekeeper.
//!
//! Module structure:
//! - `domain/` - Shared types (allowance status, wire payload)
//! - `io/` - External interfaces (HTTP client, HTTP endpoint)
//! - `services/` - Business logic (allowance decisions)
//! - `infra/` - Infrastructure (Config)

pub mod domain;
pub mod infra;
pub mod io;
pub mod services;
