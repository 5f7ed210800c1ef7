//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `gatekeeper` - HTTP client for the remote gatekeeper service
//! - `server` - HTTP endpoint answering allowance checks

pub mod gatekeeper;
pub mod server;

// Re-export commonly used types
pub use gatekeeper::{GateKeeperClient, GateKeeperError};
pub use server::start_gatekeeper_server;
