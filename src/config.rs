// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Process-wide configuration
//!
//! A single [`Config`] is installed for the whole process. Tests (and hosts
//! that need a different policy on one thread) can override it for the
//! duration of a closure with [`Config::scope`].

use std::cell::RefCell;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Whether `SafeHtml::create` accepts the `style` attribute.
///
/// Fixed at compile time through the `style-attribute` cargo feature so that
/// a build either always accepts or always rejects the attribute.
pub const SUPPORT_STYLE_ATTRIBUTE: bool = cfg!(feature = "style-attribute");

/// Default Trusted Types policy name
pub const DEFAULT_POLICY_NAME: &str = "safevalues#html";

lazy_static! {
    static ref GLOBAL: RwLock<Config> = RwLock::new(Config::default());
}

thread_local! {
    static SCOPED: RefCell<Option<Config>> = const { RefCell::new(None) };
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raise assertion failures (panic) when untrusted input is replaced by
    /// an innocuous value or a forged value is unwrapped
    pub assertions: bool,
    /// Host supports the iframe `sandbox` attribute
    pub sandbox_iframe_supported: bool,
    /// Quote meta refresh URLs containing `;` (needed by some legacy hosts)
    pub quote_meta_refresh_urls: bool,
    /// Name requested from the Trusted Types host on first use
    pub trusted_types_policy_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assertions: cfg!(debug_assertions),
            sandbox_iframe_supported: true,
            quote_meta_refresh_urls: false,
            trusted_types_policy_name: DEFAULT_POLICY_NAME.to_string(),
        }
    }
}

impl Config {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable/disable assertions
    pub fn assertions(mut self, enabled: bool) -> Self {
        self.assertions = enabled;
        self
    }

    /// Declare whether the host supports sandboxed iframes
    pub fn sandbox_iframe_supported(mut self, supported: bool) -> Self {
        self.sandbox_iframe_supported = supported;
        self
    }

    /// Quote meta refresh URLs
    pub fn quote_meta_refresh_urls(mut self, quote: bool) -> Self {
        self.quote_meta_refresh_urls = quote;
        self
    }

    /// Set Trusted Types policy name
    pub fn trusted_types_policy_name(mut self, name: impl Into<String>) -> Self {
        self.trusted_types_policy_name = name.into();
        self
    }

    /// Config for development and tests: every substitution panics
    pub fn strict() -> Self {
        Self {
            assertions: true,
            ..Default::default()
        }
    }

    /// Config for production: substitutions are logged, never raised
    pub fn production() -> Self {
        Self {
            assertions: false,
            ..Default::default()
        }
    }

    /// Run `f` with this config active on the current thread
    pub fn scope<R>(self, f: impl FnOnce() -> R) -> R {
        let previous = SCOPED.with(|cell| cell.borrow_mut().replace(self));
        let _restore = Restore(previous);
        f()
    }
}

struct Restore(Option<Config>);

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.0.take();
        SCOPED.with(|cell| *cell.borrow_mut() = previous);
    }
}

/// Install the process-wide config
pub fn install(config: Config) {
    *GLOBAL.write() = config;
}

/// Config in effect on the current thread
pub fn current() -> Config {
    SCOPED
        .with(|cell| cell.borrow().clone())
        .unwrap_or_else(|| GLOBAL.read().clone())
}

/// Whether assertion failures are raised on the current thread
pub fn assertions_enabled() -> bool {
    SCOPED
        .with(|cell| cell.borrow().as_ref().map(|c| c.assertions))
        .unwrap_or_else(|| GLOBAL.read().assertions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_overrides_and_restores() {
        let outer = current();
        let inner = Config::production().sandbox_iframe_supported(false);

        let seen = inner.clone().scope(current);
        assert_eq!(seen, inner);
        assert!(!Config::production().scope(assertions_enabled));
        assert!(Config::strict().scope(assertions_enabled));

        assert_eq!(current(), outer);
    }

    #[test]
    fn test_nested_scope() {
        Config::strict().scope(|| {
            Config::production().scope(|| assert!(!assertions_enabled()));
            assert!(assertions_enabled());
        });
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"assertions": false}"#).unwrap();
        assert!(!config.assertions);
        assert!(config.sandbox_iframe_supported);
        assert_eq!(config.trusted_types_policy_name, DEFAULT_POLICY_NAME);
    }
}
