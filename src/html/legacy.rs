// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Legacy conversions
//!
//! Wrap plain strings as safe values without any validation. These exist
//! only to migrate code that predates the safe types; every call site is a
//! potential injection point. Use the `legacy::` path at call sites so they
//! can be found with a text search.
//!
//! An application can register a report callback to count remaining uses.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use super::{SafeHtml, SafeScript, SafeStyle, SafeStyleSheet, SafeUrl, TrustedResourceUrl};

/// Called with the name of the conversion on every legacy conversion
pub type ReportCallback = Arc<dyn Fn(&'static str) + Send + Sync>;

lazy_static! {
    static ref REPORT_CALLBACK: RwLock<Option<ReportCallback>> = RwLock::new(None);
}

/// Register the report callback; replaces any earlier one
pub fn set_report_callback(callback: ReportCallback) {
    *REPORT_CALLBACK.write() = Some(callback);
}

/// Remove the report callback
pub fn clear_report_callback() {
    *REPORT_CALLBACK.write() = None;
}

fn report(conversion: &'static str) {
    tracing::debug!(conversion, "Legacy conversion used");
    // Clone so the lock is not held while the callback runs
    let callback = REPORT_CALLBACK.read().clone();
    if let Some(callback) = callback {
        callback(conversion);
    }
}

/// Wrap `html` without validation
pub fn safe_html_from_string(html: &str) -> SafeHtml {
    report("safe_html_from_string");
    SafeHtml::from_trusted(html, None)
}

/// Wrap `script` without validation
pub fn safe_script_from_string(script: &str) -> SafeScript {
    report("safe_script_from_string");
    SafeScript::from_trusted(script, None)
}

/// Wrap `style` without validation
pub fn safe_style_from_string(style: &str) -> SafeStyle {
    report("safe_style_from_string");
    SafeStyle::from_trusted(style, None)
}

/// Wrap `style_sheet` without validation
pub fn safe_style_sheet_from_string(style_sheet: &str) -> SafeStyleSheet {
    report("safe_style_sheet_from_string");
    SafeStyleSheet::from_trusted(style_sheet, None)
}

/// Wrap `url` without validation
pub fn safe_url_from_string(url: &str) -> SafeUrl {
    report("safe_url_from_string");
    SafeUrl::from_trusted(url, None)
}

/// Wrap `url` without validation
pub fn trusted_resource_url_from_string(url: &str) -> TrustedResourceUrl {
    report("trusted_resource_url_from_string");
    TrustedResourceUrl::from_trusted(url, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_keep_text() {
        assert_eq!(safe_html_from_string("<b>").unwrap(), "<b>");
        assert_eq!(safe_script_from_string("x()").unwrap(), "x()");
        assert_eq!(safe_style_from_string("a:b;").unwrap(), "a:b;");
        assert_eq!(safe_style_sheet_from_string("a{}").unwrap(), "a{}");
        assert_eq!(safe_url_from_string("javascript:x").unwrap(), "javascript:x");
        assert_eq!(trusted_resource_url_from_string("//x/").unwrap(), "//x/");
    }
}
