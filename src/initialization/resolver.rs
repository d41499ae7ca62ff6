//! DNS resolver initialization.
//!
//! This module builds the `hickory-resolver` instance behind
//! [`HickoryTransport`](crate::dns::HickoryTransport).

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::ResolverSettings;
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver used for SPF and DKIM lookups.
///
/// Name servers come from the system configuration when it can be read,
/// falling back to the resolver's default upstreams otherwise. Timeouts and
/// attempts come from `settings`.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if `settings` has a zero
/// timeout or zero attempts.
pub fn init_resolver(
    settings: &ResolverSettings,
) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    let opts = resolver_opts(settings)?;

    let config = match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, _)) => config,
        Err(e) => {
            log::warn!("Failed to read system DNS configuration, using defaults: {e}");
            ResolverConfig::default()
        }
    };

    Ok(Arc::new(TokioAsyncResolver::tokio(config, opts)))
}

fn resolver_opts(settings: &ResolverSettings) -> Result<ResolverOpts, InitializationError> {
    if settings.timeout_secs == 0 {
        return Err(InitializationError::DnsResolverError(
            "timeout must be at least one second".to_string(),
        ));
    }
    if settings.attempts == 0 {
        return Err(InitializationError::DnsResolverError(
            "at least one attempt is required".to_string(),
        ));
    }

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(settings.timeout_secs);
    opts.attempts = settings.attempts;
    // Query names are always fully qualified; never append search domains
    opts.ndots = 0;
    Ok(opts)
}
