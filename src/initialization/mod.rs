//! Application initialization.
//!
//! This module provides functions to set up shared resources:
//! - Logger (plain or JSON output)
//! - DNS resolver

mod logger;
mod resolver;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;
