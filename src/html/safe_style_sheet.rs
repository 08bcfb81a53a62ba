// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! `SafeStyleSheet`: CSS rules for a `<style>` element

use lazy_static::lazy_static;
use regex::Regex;

use super::branded::{SafeValue, StyleSheet};
use super::safe_style::StyleSource;
use crate::error::{Error, Result};
use crate::string::Const;

/// CSS rule wrapper safe for `<style>` bodies
pub type SafeStyleSheet = SafeValue<StyleSheet>;

lazy_static! {
    static ref SELECTOR_CHARS: Regex = Regex::new(r"^[-_a-zA-Z0-9#.:* ,>+~\[\]()=^$|]+$").unwrap();
    // Complete quoted strings; a raw line break or a trailing backslash
    // leaves the quote in place for the character check to reject.
    static ref QUOTED_STRING: Regex =
        Regex::new(r#"'(?:[^'\r\n\f\\]|\\[\s\S])*'|"(?:[^"\r\n\f\\]|\\[\s\S])*""#).unwrap();
}

impl SafeValue<StyleSheet> {
    /// The empty style sheet
    pub fn empty() -> SafeStyleSheet {
        SafeStyleSheet::from_trusted("", None)
    }

    /// Build `selector{declarations}`.
    ///
    /// Quoted strings in the selector may contain anything but `<`; the rest
    /// must use CSS3 selector characters with balanced `()` and `[]`. A `<`
    /// in the declarations is escaped as `\3C ` so the rule cannot close an
    /// enclosing `<style>` element.
    pub fn create_rule(selector: &str, style: impl Into<StyleSource>) -> Result<SafeStyleSheet> {
        if selector.contains('<') {
            return Err(Error::selector(selector, "Selector does not allow '<'"));
        }

        let without_strings = QUOTED_STRING.replace_all(selector, "");
        if !SELECTOR_CHARS.is_match(&without_strings) {
            return Err(Error::selector(
                selector,
                "Selector allows only [-_a-zA-Z0-9#.:* ,>+~[\\]()=^$|] and strings",
            ));
        }
        if !has_balanced_brackets(&without_strings) {
            return Err(Error::selector(selector, "() and [] in selector must be balanced"));
        }

        let style = style.into().into_safe_style()?;
        let rule = format!("{}{{{}}}", selector, style.unwrap().replace('<', "\\3C "));
        Ok(SafeStyleSheet::from_trusted(rule, None))
    }

    /// Wrap a literal style sheet; `<` is not allowed
    pub fn from_constant(style_sheet: Const) -> Result<SafeStyleSheet> {
        let text = style_sheet.unwrap();
        if text.is_empty() {
            return Ok(SafeStyleSheet::empty());
        }
        if text.contains('<') {
            return Err(Error::InvalidConstant {
                kind: "SafeStyleSheet",
                reason: format!("Forbidden '<' character in style sheet string: {}", text),
            });
        }
        Ok(SafeStyleSheet::from_trusted(text, None))
    }

    /// Concatenate rules
    pub fn concat<'a>(sheets: impl IntoIterator<Item = &'a SafeStyleSheet>) -> SafeStyleSheet {
        let text: String = sheets.into_iter().map(SafeStyleSheet::unwrap).collect();
        SafeStyleSheet::from_trusted(text, None)
    }
}

impl Default for SafeValue<StyleSheet> {
    fn default() -> Self {
        SafeStyleSheet::empty()
    }
}

fn has_balanced_brackets(s: &str) -> bool {
    let mut expected = Vec::new();
    for c in s.chars() {
        match c {
            '(' => expected.push(')'),
            '[' => expected.push(']'),
            ')' | ']' => {
                if expected.pop() != Some(c) {
                    return false;
                }
            }
            _ => {}
        }
    }
    expected.is_empty()
}
