//! Error handling.
//!
//! This module provides the error types surfaced by the lookup facade and by
//! application setup:
//! - `DnsLookupError`: the two failure kinds an SPF/DKIM evaluator must
//!   tell apart (transport failure vs. exhausted lookup budget)
//! - `InitializationError`: logger and resolver setup failures

mod types;

// Re-export public API
pub use types::{DnsLookupError, InitializationError};
