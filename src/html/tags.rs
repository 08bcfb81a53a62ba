// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element tables used by the `SafeHtml` builders

/// Elements that never have content or a closing tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements the generic builder refuses: they load code, change document
/// metadata or switch the parser into a foreign content mode
const NOT_ALLOWED_TAGS: &[&str] = &[
    "applet", "base", "embed", "iframe", "link", "math", "meta", "object", "script", "style",
    "svg", "template",
];

/// Whether `tag` is a void element (case-insensitive)
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// Whether `tag` needs a dedicated builder (case-insensitive)
pub fn is_not_allowed_tag(tag: &str) -> bool {
    NOT_ALLOWED_TAGS.iter().any(|denied| denied.eq_ignore_ascii_case(tag))
}
