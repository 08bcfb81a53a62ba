// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # safevalues - Injection-Safe String Types
//!
//! Immutable, branded string types whose construction is restricted so that
//! inserting their text into the matching sink of an HTML document cannot
//! execute script the application did not intend.
//!
//! ## Features
//!
//! - SafeHtml: escaping, concatenation and element builders with per-sink
//!   attribute checks
//! - SafeUrl: URL sanitization with an innocuous fallback
//! - TrustedResourceUrl: code-loading URLs from literal templates
//! - SafeStyle / SafeStyleSheet: CSS declarations and rules
//! - SafeScript: script bodies from literals or JSON
//! - Trusted Types: optional host policy integration
//! - Escape hatches: legacy and reviewed unchecked conversions
//!
//! Programmer errors (invalid names, malformed constants) return
//! [`Error`]. Untrusted content never fails: it is replaced by an innocuous
//! value, and an assertion failure is raised when `Config::assertions` is
//! on.
//!
//! ## Example
//!
//! ```rust
//! use safevalues::{Attributes, Const, SafeHtml, SafeUrl};
//!
//! fn main() -> Result<(), safevalues::Error> {
//!     let link = SafeHtml::create(
//!         "a",
//!         &Attributes::new()
//!             .set("href", SafeUrl::sanitize("javascript:alert(1)"))
//!             .set("onclick", Const::from_static("track()")),
//!         "<click>",
//!     )?;
//!
//!     assert_eq!(
//!         link.unwrap(),
//!         r#"<a href="about:invalid#zClosurez" onclick="track()">&lt;click&gt;</a>"#
//!     );
//!     Ok(())
//! }
//! ```

mod asserts;
pub mod config;
pub mod error;
pub mod html;
pub mod i18n;
pub mod string;

// Re-exports for convenience

// Config
pub use config::{Config, SUPPORT_STYLE_ATTRIBUTE};

// Errors
pub use error::{Error, Result};

// Safe types
pub use html::{
    SafeHtml, SafeScript, SafeStyle, SafeStyleSheet, SafeUrl, SafeValue, TrustedResourceUrl,
};

// Builder inputs
pub use html::{AttributeValue, Attributes, Content};
pub use html::{PropertyValue, StyleMap, StyleSource};
pub use html::{FormatArg, FormatArgs, UrlParams, UrlSource};

// Escape hatches
pub use html::{legacy, unchecked};

// Strings
pub use i18n::Dir;
pub use string::{Const, DirectionalString, TypedString};

/// safevalues version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
