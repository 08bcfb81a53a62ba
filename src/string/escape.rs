// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Escaping primitives

use lazy_static::lazy_static;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

/// Characters `encodeURIComponent` escapes: everything except
/// `A-Za-z0-9-_.!~*'()`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

lazy_static! {
    static ref NEWLINE: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
    static ref PERCENT_ESCAPE: Regex = Regex::new(r"%(?:[0-9a-fA-F]{2}|.?.?)").unwrap();
}

/// Escape `& < > " '` and NUL for use in HTML text or a quoted attribute
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\0' => escaped.push_str("&#0;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Replace every line break with `<br>`
pub fn newline_to_br(text: &str) -> String {
    NEWLINE.replace_all(text, "<br>").into_owned()
}

/// Keep runs of spaces and line breaks visible in HTML
pub fn whitespace_escape(text: &str) -> String {
    newline_to_br(&text.replace("  ", " &#160;"))
}

/// Percent-encode like JavaScript's `encodeURIComponent`
pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Decode like JavaScript's `decodeURIComponent`.
///
/// Returns `None` for a malformed `%` escape or bytes that are not UTF-8.
pub fn decode_uri_component(text: &str) -> Option<String> {
    let well_formed = PERCENT_ESCAPE
        .find_iter(text)
        .all(|m| m.as_str().len() == 3 && m.as_str()[1..].chars().all(|c| c.is_ascii_hexdigit()));
    if !well_formed {
        return None;
    }
    percent_decode_str(text)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>"), "&lt;b&gt;");
        assert_eq!(
            html_escape(r#"a & "b" 'c'"#),
            "a &amp; &quot;b&quot; &#39;c&#39;"
        );
        assert_eq!(html_escape("a\0b"), "a&#0;b");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_newline_to_br() {
        assert_eq!(newline_to_br("a\r\nb\rc\nd"), "a<br>b<br>c<br>d");
    }

    #[test]
    fn test_whitespace_escape() {
        assert_eq!(whitespace_escape("a   b\nc"), "a &#160; b<br>c");
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a b/c?d=e&f"), "a%20b%2Fc%3Fd%3De%26f");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn test_decode_uri_component() {
        assert_eq!(decode_uri_component("a%20b").as_deref(), Some("a b"));
        assert_eq!(decode_uri_component("%C3%A9").as_deref(), Some("é"));
        assert_eq!(decode_uri_component("%"), None);
        assert_eq!(decode_uri_component("%2"), None);
        assert_eq!(decode_uri_component("%zz"), None);
        assert_eq!(decode_uri_component("%FF"), None);
    }
}
