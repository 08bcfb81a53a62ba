// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Assertion failures for untrusted input
//!
//! Content that does not satisfy a type contract is replaced by an innocuous
//! value. When [`Config::assertions`](crate::Config) is on, the replacement
//! is additionally reported by panicking so development builds and tests
//! surface the problem; otherwise it is only logged.

use std::fmt;

use crate::config;

/// Report an assertion failure.
///
/// Returns normally only when assertions are disabled; callers then carry
/// on with the innocuous fallback.
pub(crate) fn fail(message: impl fmt::Display) {
    tracing::warn!(%message, "safe value contract violated, using innocuous value");
    if config::assertions_enabled() {
        panic!("Assertion failed: {}", message);
    }
}

/// Check `condition`, reporting `message` if it does not hold.
pub(crate) fn check<M: fmt::Display>(condition: bool, message: impl FnOnce() -> M) -> bool {
    if !condition {
        fail(message());
    }
    condition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn test_check_passes_through() {
        assert!(Config::strict().scope(|| check(true, || "unused")));
    }

    #[test]
    fn test_disabled_assertions_return() {
        assert!(!Config::production().scope(|| check(false, || "bad input")));
    }

    #[test]
    #[should_panic(expected = "Assertion failed: bad input")]
    fn test_enabled_assertions_panic() {
        Config::strict().scope(|| fail("bad input"));
    }
}
