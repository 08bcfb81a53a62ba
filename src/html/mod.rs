// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Safe value types
//!
//! Provides branded wrappers for the string sinks of an HTML document:
//! - `SafeHtml` for element content, with escaping and element builders
//! - `SafeUrl` for navigation, with URL sanitization
//! - `TrustedResourceUrl` for code-loading URLs, from literal templates
//! - `SafeStyle` and `SafeStyleSheet` for CSS
//! - `SafeScript` for script bodies
//! - `legacy` and `unchecked` escape hatches

mod branded;
pub mod legacy;
mod safe_html;
mod safe_script;
mod safe_style;
mod safe_style_sheet;
mod safe_url;
pub mod tags;
pub mod trusted_types;
mod trusted_resource_url;
pub mod unchecked;

pub use branded::{Html, ResourceUrl, SafeKind, SafeValue, Script, Style, StyleSheet, Url};
pub use safe_html::{AttributeValue, Attributes, Content, SafeHtml};
pub use safe_script::SafeScript;
pub use safe_style::{PropertyValue, SafeStyle, StyleMap, StyleSource};
pub use safe_style_sheet::SafeStyleSheet;
pub use safe_url::{is_safe_mime_type, SafeUrl, UrlSource};
pub use trusted_resource_url::{FormatArg, FormatArgs, TrustedResourceUrl, UrlParams};
pub use trusted_types::{
    PlatformValue, TrustedPlatformValue, TrustedTypeKind, TrustedTypesHost, TrustedTypesPolicy,
};

/// Placeholder URL substituted for unsafe input
pub use safe_url::INNOCUOUS_STRING as INNOCUOUS_URL;

/// Placeholder CSS value substituted for unsafe input
pub use safe_style::INNOCUOUS_STRING as INNOCUOUS_STYLE;
