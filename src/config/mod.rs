//! Application configuration and constants.
//!
//! This module provides:
//! - Lookup budget and record marker constants
//! - Resolver timeout defaults
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, LogFormat, LogLevel, LookupArgs, ResolverSettings};
