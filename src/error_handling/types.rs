//! Error type definitions.

use log::SetLoggerError;
use thiserror::Error;

/// Errors produced by the DNS lookup facade.
///
/// Exactly two kinds exist. Callers map them onto SPF results themselves:
/// `Resolution` usually becomes `temperror`, while `LookupLimitExceeded`
/// must stop evaluation with the RFC 7208 section 4.6.4 processing-limit outcome.
#[derive(Error, Debug)]
pub enum DnsLookupError {
    /// The transport failed to produce an answer for `name`.
    ///
    /// An empty answer is not an error; this variant only covers failures
    /// such as unreachable name servers, timeouts or malformed responses.
    #[error("DNS resolution failed for {name}")]
    Resolution {
        /// Query name (or input literal) that failed.
        name: String,
        /// Underlying transport error.
        #[source]
        source: anyhow::Error,
    },

    /// The per-evaluation lookup budget was exceeded while enforcement is on.
    #[error("DNS lookup limit of {limit} exceeded ({count} lookups)")]
    LookupLimitExceeded {
        /// Lookup count after the failing increment.
        count: usize,
        /// Configured budget.
        limit: usize,
    },
}

impl DnsLookupError {
    pub(crate) fn resolution(name: impl Into<String>, source: anyhow::Error) -> Self {
        DnsLookupError::Resolution {
            name: name.into(),
            source,
        }
    }

    /// Returns `true` for the terminal budget error.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, DnsLookupError::LookupLimitExceeded { .. })
    }

    /// Returns `true` for transport-level failures.
    pub fn is_resolution(&self) -> bool {
        matches!(self, DnsLookupError::Resolution { .. })
    }

    /// The query name a resolution error refers to.
    pub fn query_name(&self) -> Option<&str> {
        match self {
            DnsLookupError::Resolution { name, .. } => Some(name),
            DnsLookupError::LookupLimitExceeded { .. } => None,
        }
    }
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}
