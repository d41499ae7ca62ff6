//! Per-evaluation DNS lookup budget.
//!
//! RFC 7208 section 4.6.4 caps an SPF evaluation at 10 DNS-querying terms. The
//! budget spans the whole evaluation, including `include` and `redirect`
//! targets, so the session is reset once per top-level check and never in
//! between.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::config::DNS_LOOKUP_LIMIT;
use crate::error_handling::DnsLookupError;

/// Lookup counter and enforcement switch for one evaluation.
///
/// Counting is lock-free: the increment and the limit comparison use the
/// value returned by a single `fetch_add`, so a session shared through `Arc`
/// never lets two concurrent callers both observe the last free slot.
/// Independent evaluations should still use independent sessions.
#[derive(Debug)]
pub struct LookupSession {
    request_count: AtomicUsize,
    enforcement_enabled: AtomicBool,
    limit: usize,
}

impl Default for LookupSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupSession {
    /// Creates a session with the RFC 7208 limit and enforcement on.
    pub fn new() -> Self {
        Self::with_limit(DNS_LOOKUP_LIMIT)
    }

    /// Creates a session with a custom budget.
    pub fn with_limit(limit: usize) -> Self {
        LookupSession {
            request_count: AtomicUsize::new(0),
            enforcement_enabled: AtomicBool::new(true),
            limit,
        }
    }

    /// Charges one lookup to the budget and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns `DnsLookupError::LookupLimitExceeded` when the new count is
    /// above the limit and enforcement is enabled. The count stays
    /// incremented either way.
    pub fn count_lookup(&self) -> Result<usize, DnsLookupError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        if count <= self.limit {
            log::debug!("DNS lookup {count}/{} charged", self.limit);
            return Ok(count);
        }

        if self.enforcement_enabled() {
            log::debug!("DNS lookup limit of {} exceeded ({count} lookups)", self.limit);
            return Err(DnsLookupError::LookupLimitExceeded {
                count,
                limit: self.limit,
            });
        }

        if is_first_overage(count, self.limit) {
            log::warn!(
                "DNS lookup limit of {} exceeded with enforcement disabled, continuing",
                self.limit
            );
        }
        Ok(count)
    }

    /// Sets the lookup count back to zero.
    pub fn reset(&self) {
        self.request_count.store(0, Ordering::SeqCst);
    }

    /// Lookups charged since the last reset, including failed charges.
    pub fn count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of lookups allowed per evaluation.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Lookups left before the next charge would exceed the limit.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.count())
    }

    /// Turns limit enforcement on or off. Counting continues while off.
    pub fn set_enforcement(&self, enabled: bool) {
        self.enforcement_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Whether charges over the limit fail.
    pub fn enforcement_enabled(&self) -> bool {
        self.enforcement_enabled.load(Ordering::SeqCst)
    }
}

/// Monitoring mode warns once per evaluation, on the first charge past the limit.
fn is_first_overage(count: usize, limit: usize) -> bool {
    count == limit + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_session_defaults() {
        let session = LookupSession::new();
        assert_eq!(session.count(), 0);
        assert_eq!(session.limit(), DNS_LOOKUP_LIMIT);
        assert!(session.enforcement_enabled());
        assert_eq!(session.remaining(), DNS_LOOKUP_LIMIT);
    }

    #[test]
    fn test_eleventh_lookup_fails() {
        let session = LookupSession::new();
        for expected in 1..=10 {
            assert_eq!(session.count_lookup().unwrap(), expected);
        }
        assert_eq!(session.remaining(), 0);

        let err = session.count_lookup().unwrap_err();
        assert!(matches!(
            err,
            DnsLookupError::LookupLimitExceeded {
                count: 11,
                limit: 10
            }
        ));
        assert_eq!(session.count(), 11);
    }

    #[test]
    fn test_every_call_past_limit_fails() {
        let session = LookupSession::new();
        for _ in 0..10 {
            session.count_lookup().unwrap();
        }
        for _ in 0..3 {
            assert!(session.count_lookup().unwrap_err().is_limit_exceeded());
        }
        assert_eq!(session.count(), 13);
    }

    #[test]
    fn test_disabled_enforcement_keeps_counting() {
        let session = LookupSession::new();
        session.set_enforcement(false);
        for expected in 1..=15 {
            assert_eq!(session.count_lookup().unwrap(), expected);
        }
        assert_eq!(session.count(), 15);
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_overage_warning_only_once() {
        let warned: Vec<usize> = (1..=20)
            .filter(|count| is_first_overage(*count, DNS_LOOKUP_LIMIT))
            .collect();
        assert_eq!(warned, vec![11]);
        assert!(is_first_overage(3, 2));
        assert!(!is_first_overage(2, 2));
    }

    #[test]
    fn test_reenabling_enforcement_fails_next_charge() {
        let session = LookupSession::new();
        session.set_enforcement(false);
        for _ in 0..12 {
            session.count_lookup().unwrap();
        }
        session.set_enforcement(true);
        assert!(session.count_lookup().is_err());
    }

    #[test]
    fn test_reset_restores_full_budget() {
        let session = LookupSession::new();
        for _ in 0..10 {
            session.count_lookup().unwrap();
        }
        assert!(session.count_lookup().is_err());

        session.reset();
        assert_eq!(session.count(), 0);
        for _ in 0..10 {
            session.count_lookup().unwrap();
        }
        assert!(session.count_lookup().is_err());
    }

    #[test]
    fn test_custom_limit() {
        let session = LookupSession::with_limit(2);
        session.count_lookup().unwrap();
        session.count_lookup().unwrap();
        assert!(matches!(
            session.count_lookup(),
            Err(DnsLookupError::LookupLimitExceeded { count: 3, limit: 2 })
        ));
    }

    #[test]
    fn test_concurrent_charges_grant_exactly_limit() {
        let session = Arc::new(LookupSession::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                std::thread::spawn(move || {
                    (0..5).filter(|_| session.count_lookup().is_ok()).count()
                })
            })
            .collect();

        let granted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(granted, DNS_LOOKUP_LIMIT);
        assert_eq!(session.count(), 40);
    }
}
