//! Services - business logic
//!
//! This module contains the core business logic services:
//! - `allowance` - email allowance decision engine

pub mod allowance;

// Re-export commonly used types
pub use allowance::{AllowanceService, Decision};
