// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Client-side view of the server's rate limit.
//!
//! The server reports the number of calls left in the current window with
//! `X-RateLimit-Remaining`, and, once that reaches zero, how long to wait with
//! `Retry-After`. The snapshot is replaced after every response and consulted
//! before every call; it is never decremented by the client.

use crate::error::{AdoptError, Result};
use crate::transport::{HeaderMap, header_value};
use log::{debug, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const REMAINING_HEADER: &str = "X-RateLimit-Remaining";
pub const RETRY_AFTER_HEADER: &str = "Retry-After";

/// Retry window assumed whenever the server does not say otherwise.
pub const NOMINAL_RETRY_SECONDS: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: u32,
    pub retry_after_seconds: u32,
}

impl RateLimit {
    /// Stands for "no known limit".
    pub const UNBOUNDED: u32 = u32::MAX;

    pub fn unbounded() -> Self {
        Self {
            remaining: Self::UNBOUNDED,
            retry_after_seconds: NOMINAL_RETRY_SECONDS,
        }
    }

    /// Decode the rate-limit headers of a response.
    ///
    /// A missing or non-numeric remaining count falls back to
    /// [`RateLimit::unbounded`]; a missing or non-numeric retry delay on an
    /// exhausted budget falls back to zero. Both are logged as warnings.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(remaining) = parse_header(headers, REMAINING_HEADER) else {
            warn!("Unable to determine remaining request limit; assuming no limit");
            return Self::unbounded();
        };

        let retry_after_seconds = if remaining == 0 {
            parse_header(headers, RETRY_AFTER_HEADER).unwrap_or_else(|| {
                warn!("Unable to determine retry time for exhausted rate limit");
                0
            })
        } else {
            NOMINAL_RETRY_SECONDS
        };

        Self {
            remaining,
            retry_after_seconds,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    pub fn is_unbounded(&self) -> bool {
        self.remaining == Self::UNBOUNDED
    }

    /// Fails with `RateLimitExceeded` when no calls remain.
    pub fn check(&self) -> Result<()> {
        if self.is_exhausted() {
            return Err(AdoptError::RateLimitExceeded {
                retry_after_seconds: self.retry_after_seconds,
            });
        }
        Ok(())
    }
}

fn parse_header(headers: &HeaderMap, name: &str) -> Option<u32> {
    let raw = header_value(headers, name)?;
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {name} header with unusable value '{raw}': {e}");
            None
        }
    }
}

/// Owns the current [`RateLimit`] of one client.
#[derive(Debug)]
pub struct RateLimiter {
    state: Mutex<RateLimit>,
}

impl RateLimiter {
    pub fn new(initial: RateLimit) -> Self {
        debug!(
            "Rate limit initialised: remaining={}, retry_after={}s",
            initial.remaining, initial.retry_after_seconds
        );
        Self {
            state: Mutex::new(initial),
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::new(RateLimit::from_headers(headers))
    }

    /// Exclusive access for one gate-check-then-update sequence.
    ///
    /// Holding the permit across a call keeps a second caller from passing
    /// the gate on a snapshot the first call is about to replace.
    pub fn acquire(&self) -> RateLimitPermit<'_> {
        RateLimitPermit {
            state: self.state.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    pub fn snapshot(&self) -> RateLimit {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn remaining(&self) -> u32 {
        self.snapshot().remaining
    }
}

pub struct RateLimitPermit<'a> {
    state: MutexGuard<'a, RateLimit>,
}

impl RateLimitPermit<'_> {
    pub fn check(&self) -> Result<()> {
        self.state.check()
    }

    /// Replace the snapshot with the one carried by `headers`.
    pub fn update(&mut self, headers: &HeaderMap) -> RateLimit {
        let next = RateLimit::from_headers(headers);
        debug!(
            "Rate limit updated: remaining={}, retry_after={}s",
            next.remaining, next.retry_after_seconds
        );
        *self.state = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::header_map;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_remaining_header_sets_nominal_retry() {
        let limit = RateLimit::from_headers(&header_map([("X-RateLimit-Remaining", "5")]));
        assert_eq!(limit.remaining, 5);
        assert_eq!(limit.retry_after_seconds, NOMINAL_RETRY_SECONDS);
        assert!(limit.check().is_ok());
    }

    #[test]
    fn test_exhausted_with_retry_after() {
        let headers = header_map([("X-RateLimit-Remaining", "0"), ("Retry-After", "120")]);
        let limiter = RateLimiter::new(RateLimit::unbounded());
        limiter.acquire().update(&headers);

        let result = limiter.acquire().check();
        match result {
            Err(AdoptError::RateLimitExceeded {
                retry_after_seconds,
            }) => assert_eq!(retry_after_seconds, 120),
            other => panic!("expected RateLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_exhausted_without_retry_after_defaults_to_zero() {
        let limit = RateLimit::from_headers(&header_map([("X-RateLimit-Remaining", "0")]));
        assert_eq!(limit.remaining, 0);
        assert_eq!(limit.retry_after_seconds, 0);
        assert!(limit.check().is_err());
    }

    #[test]
    fn test_missing_remaining_header_is_unbounded() {
        let limit = RateLimit::from_headers(&header_map([("Retry-After", "10")]));
        assert_eq!(limit.remaining, RateLimit::UNBOUNDED);
        assert_eq!(limit.retry_after_seconds, NOMINAL_RETRY_SECONDS);
        assert!(limit.is_unbounded());
        assert!(limit.check().is_ok());
    }

    #[test]
    fn test_non_numeric_values_degrade() {
        let limit = RateLimit::from_headers(&header_map([("X-RateLimit-Remaining", "lots")]));
        assert_eq!(limit, RateLimit::unbounded());

        let limit = RateLimit::from_headers(&header_map([("X-RateLimit-Remaining", "-3")]));
        assert_eq!(limit, RateLimit::unbounded());

        let limit = RateLimit::from_headers(&header_map([
            ("X-RateLimit-Remaining", "0"),
            ("Retry-After", "Wed, 21 Oct 2015 07:28:00 GMT"),
        ]));
        assert_eq!(limit.remaining, 0);
        assert_eq!(limit.retry_after_seconds, 0);
    }

    #[test]
    fn test_retry_after_ignored_when_budget_remains() {
        let headers = header_map([("X-RateLimit-Remaining", "3"), ("Retry-After", "60")]);
        let limit = RateLimit::from_headers(&headers);
        assert_eq!(limit.retry_after_seconds, NOMINAL_RETRY_SECONDS);
    }

    #[test]
    fn test_gate_check_does_not_decrement() {
        let limiter = RateLimiter::from_headers(&header_map([("X-RateLimit-Remaining", "1")]));
        for _ in 0..5 {
            assert!(limiter.acquire().check().is_ok());
        }
        assert_eq!(limiter.remaining(), 1);
    }

    #[test]
    fn test_update_replaces_snapshot_wholesale() {
        let limiter = RateLimiter::from_headers(&header_map([
            ("X-RateLimit-Remaining", "0"),
            ("Retry-After", "30"),
        ]));
        let next = limiter
            .acquire()
            .update(&header_map([("X-RateLimit-Remaining", "7")]));

        assert_eq!(next, limiter.snapshot());
        assert_eq!(limiter.remaining(), 7);
        assert_eq!(limiter.snapshot().retry_after_seconds, NOMINAL_RETRY_SECONDS);
    }

    #[test]
    fn test_permits_serialise_check_and_update() {
        let limiter = Arc::new(RateLimiter::from_headers(&header_map([(
            "X-RateLimit-Remaining",
            "1",
        )])));

        // Each caller passes the gate and then reports an exhausted budget.
        // With exclusive permits exactly one caller can pass.
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                thread::spawn(move || {
                    let mut permit = limiter.acquire();
                    if permit.check().is_err() {
                        return false;
                    }
                    permit.update(&header_map([
                        ("X-RateLimit-Remaining", "0"),
                        ("Retry-After", "60"),
                    ]));
                    true
                })
            })
            .collect();

        let passed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|passed| *passed)
            .count();
        assert_eq!(passed, 1);
    }
}
