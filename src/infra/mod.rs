//! Infrastructure - configuration
//!
//! This module contains infrastructure concerns:
//! - `config` - Client configuration and server config (TOML loading)

pub mod config;

// Re-export commonly used types
pub use config::{Configuration, ServerConfig};
