// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! `SafeStyle`: CSS declarations for a `style` attribute
//!
//! A `SafeStyle` is a sequence of `name:value;` declarations. Every
//! declaration ends with `;`, so concatenating two values can never move text
//! from one declaration's value into the next one's name.
//!
//! Values are checked against a flat character allow-list after removing one
//! level of allow-listed functions (`calc(...)`, `rgb(...)`, ...). The check is
//! deliberately restrictive; it is not a CSS parser.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::branded::{SafeValue, Style};
use super::SafeUrl;
use crate::asserts;
use crate::error::{Error, Result};
use crate::string::Const;

/// CSS declaration wrapper safe for `style` attributes
pub type SafeStyle = SafeValue<Style>;

/// Placeholder substituted for property values that fail sanitization
pub const INNOCUOUS_STRING: &str = "zClosurez";

const VALUE_ALLOWED_CHARS: &str = r#"[-+,."'%_!#/ a-zA-Z0-9\[\]]"#;

const ALLOWED_FUNCTIONS: &[&str] = &[
    "calc",
    "cubic-bezier",
    "fit-content",
    "hsl",
    "hsla",
    "linear-gradient",
    "matrix",
    "minmax",
    "repeat",
    "rgb",
    "rgba",
    "(?:rotate|scale|translate)(?:X|Y|Z|3d)?",
    "var",
];

lazy_static! {
    static ref PROPERTY_NAME: Regex = Regex::new(r"^[-_a-zA-Z0-9]+$").unwrap();
    static ref VALUE_RE: Regex = Regex::new(&format!("^{}+$", VALUE_ALLOWED_CHARS)).unwrap();
    static ref FUNCTIONS_RE: Regex = Regex::new(&format!(
        r"(?i)\b({})\([-+*/0-9a-z.%\[\], ]+\)",
        ALLOWED_FUNCTIONS.join("|")
    ))
    .unwrap();
    static ref URL_RE: Regex = Regex::new(concat!(
        r"\b(url\([ \t\n]*)(",
        r"'[ -&(-\[\]-~]*'",
        r#"|"[ !#-\[\]-~]*""#,
        r"|[!#-&*-\[\]-~]*",
        r")([ \t\n]*\))",
    ))
    .unwrap();
    static ref CONTEXT_CHANGE: Regex = Regex::new(r"[{;}]").unwrap();
}

/// Value of a single CSS property
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// Untrusted text, sanitized
    Text(String),
    /// Program literal, used as written
    Const(Const),
    /// Rendered as `url("...")`
    Url(SafeUrl),
    /// Multiple values joined with a space (`font-family`, ...)
    List(Vec<PropertyValue>),
    /// Omit the property
    Skip,
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<Const> for PropertyValue {
    fn from(value: Const) -> Self {
        PropertyValue::Const(value)
    }
}

impl From<SafeUrl> for PropertyValue {
    fn from(value: SafeUrl) -> Self {
        PropertyValue::Url(value)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(values: Vec<T>) -> Self {
        PropertyValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Skip, Into::into)
    }
}

/// Ordered CSS property map
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    properties: Vec<(String, PropertyValue)>,
}

impl StyleMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an earlier value with the same name
    pub fn set(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.properties.push((name, value)),
        }
        self
    }

    /// Whether the map has no properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<N: Into<String>, V: Into<PropertyValue>> FromIterator<(N, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(StyleMap::new(), |map, (name, value)| map.set(name, value))
    }
}

/// Style given either as a finished `SafeStyle` or as properties to build one
#[derive(Debug, Clone)]
pub enum StyleSource {
    /// Already safe
    Safe(SafeStyle),
    /// Built with [`SafeStyle::create`]
    Map(StyleMap),
}

impl StyleSource {
    /// Resolve to a `SafeStyle`
    pub fn into_safe_style(self) -> Result<SafeStyle> {
        match self {
            StyleSource::Safe(style) => Ok(style),
            StyleSource::Map(map) => SafeStyle::create(&map),
        }
    }
}

impl From<SafeStyle> for StyleSource {
    fn from(style: SafeStyle) -> Self {
        StyleSource::Safe(style)
    }
}

impl From<&SafeStyle> for StyleSource {
    fn from(style: &SafeStyle) -> Self {
        StyleSource::Safe(style.clone())
    }
}

impl From<StyleMap> for StyleSource {
    fn from(map: StyleMap) -> Self {
        StyleSource::Map(map)
    }
}

impl SafeValue<Style> {
    /// The empty style
    pub fn empty() -> SafeStyle {
        SafeStyle::from_trusted("", None)
    }

    /// Build declarations from a property map.
    ///
    /// Invalid property *names* are an error. Invalid *values* are replaced
    /// by [`INNOCUOUS_STRING`] (raising an assertion failure when assertions
    /// are enabled). A value, even a `Const`, that contains `{`, `;` or `}`
    /// is an error.
    pub fn create(map: &StyleMap) -> Result<SafeStyle> {
        let mut style = String::new();
        for (name, value) in map.iter() {
            if !PROPERTY_NAME.is_match(name) {
                return Err(Error::InvalidPropertyName(name.to_string()));
            }
            let value = match value {
                PropertyValue::Skip => continue,
                value => sanitize_property_value(value)?,
            };
            style.push_str(name);
            style.push(':');
            style.push_str(&value);
            style.push(';');
        }
        if style.is_empty() {
            return Ok(SafeStyle::empty());
        }
        Ok(SafeStyle::from_trusted(style, None))
    }

    /// Wrap a literal of the form `name:value;...`
    pub fn from_constant(style: Const) -> Result<SafeStyle> {
        let text = style.unwrap();
        if text.is_empty() {
            return Ok(SafeStyle::empty());
        }
        if !text.ends_with(';') {
            return Err(Error::InvalidConstant {
                kind: "SafeStyle",
                reason: format!("Last character of style string is not ';': {}", text),
            });
        }
        if !text.contains(':') {
            return Err(Error::InvalidConstant {
                kind: "SafeStyle",
                reason: format!(
                    "Style string must contain at least one ':', to specify a \"name: value\" pair: {}",
                    text
                ),
            });
        }
        Ok(SafeStyle::from_trusted(text, None))
    }

    /// Concatenate declarations
    pub fn concat<'a>(styles: impl IntoIterator<Item = &'a SafeStyle>) -> SafeStyle {
        let style: String = styles.into_iter().map(SafeStyle::unwrap).collect();
        SafeStyle::from_trusted(style, None)
    }
}

impl Default for SafeValue<Style> {
    fn default() -> Self {
        SafeStyle::empty()
    }
}

fn sanitize_property_value(value: &PropertyValue) -> Result<String> {
    let result = match value {
        PropertyValue::Url(url) => {
            let escaped = url
                .unwrap()
                .replace('<', "%3c")
                .replace('\\', "\\\\")
                .replace('"', "\\\"");
            return Ok(format!("url(\"{}\")", escaped));
        }
        PropertyValue::List(values) => {
            let parts = values
                .iter()
                .filter(|v| !matches!(v, PropertyValue::Skip))
                .map(sanitize_property_value)
                .collect::<Result<Vec<_>>>()?;
            parts.join(" ")
        }
        PropertyValue::Const(value) => value.unwrap().to_string(),
        PropertyValue::Text(value) => sanitize_property_value_string(value),
        PropertyValue::Skip => String::new(),
    };
    if CONTEXT_CHANGE.is_match(&result) {
        return Err(Error::InvalidPropertyValue(result));
    }
    Ok(result)
}

fn sanitize_property_value_string(value: &str) -> String {
    // One level of nested functions is allowed; both passes strip arguments.
    let once = FUNCTIONS_RE.replace_all(value, "${1}");
    let twice = FUNCTIONS_RE.replace_all(&once, "${1}");
    let without_functions = URL_RE.replace_all(&twice, "url");

    let failure = if !VALUE_RE.is_match(&without_functions) {
        Some(format!(
            "String value allows only {} and simple functions, got: {}",
            VALUE_ALLOWED_CHARS, value
        ))
    } else if value.contains("/*") {
        Some(format!("String value disallows comments, got: {}", value))
    } else if !has_balanced_quotes(value) {
        Some(format!("String value requires balanced quotes, got: {}", value))
    } else if !has_balanced_square_brackets(value) {
        Some(format!(
            "String value requires balanced square brackets and one identifier per pair of brackets, got: {}",
            value
        ))
    } else {
        None
    };

    match failure {
        Some(message) => {
            asserts::fail(message);
            INNOCUOUS_STRING.to_string()
        }
        None => sanitize_urls(value),
    }
}

fn has_balanced_quotes(value: &str) -> bool {
    let mut outside_single = true;
    let mut outside_double = true;
    for c in value.chars() {
        if c == '\'' && outside_double {
            outside_single = !outside_single;
        } else if c == '"' && outside_single {
            outside_double = !outside_double;
        }
    }
    outside_single && outside_double
}

/// `[` and `]` must pair up, without nesting, around a single identifier
fn has_balanced_square_brackets(value: &str) -> bool {
    let mut outside = true;
    for c in value.chars() {
        match c {
            ']' if outside => return false,
            ']' => outside = true,
            '[' if !outside => return false,
            '[' => outside = false,
            c if !outside && !(c.is_ascii_alphanumeric() || c == '-' || c == '_') => return false,
            _ => {}
        }
    }
    outside
}

/// Re-sanitize the target of every `url(...)` through `SafeUrl::sanitize`
fn sanitize_urls(value: &str) -> String {
    URL_RE
        .replace_all(value, |caps: &Captures| {
            let url = &caps[2];
            let (quote, inner) = match url.chars().next() {
                Some(q @ ('\'' | '"')) if url.len() >= 2 && url.ends_with(q) => {
                    (&url[..1], &url[1..url.len() - 1])
                }
                _ => ("", url),
            };
            format!(
                "{}{}{}{}{}",
                &caps[1],
                quote,
                SafeUrl::sanitize(inner).unwrap(),
                quote,
                &caps[3]
            )
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn style(name: &str, value: impl Into<PropertyValue>) -> Result<SafeStyle> {
        SafeStyle::create(&StyleMap::new().set(name, value))
    }

    fn lenient(name: &str, value: &str) -> String {
        Config::production().scope(|| style(name, value).unwrap().into_string())
    }

    #[test]
    fn test_create_simple() {
        assert_eq!(style("width", "1em").unwrap().unwrap(), "width:1em;");
        let map = StyleMap::new()
            .set("margin", "0")
            .set("background-color", "#fff")
            .set("color", PropertyValue::Skip);
        assert_eq!(
            SafeStyle::create(&map).unwrap().unwrap(),
            "margin:0;background-color:#fff;"
        );
    }

    #[test]
    fn test_create_empty() {
        assert!(SafeStyle::create(&StyleMap::new()).unwrap().is_empty());
        let skipped = StyleMap::new().set("width", None::<&str>);
        assert!(SafeStyle::create(&skipped).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_property_name() {
        let err = style("width;color", "red").unwrap_err();
        assert!(matches!(err, Error::InvalidPropertyName(_)));
        assert!(style("", "red").is_err());
    }

    #[test]
    fn test_list_values() {
        let value = vec!["Arial", "'Open Sans'", "sans-serif"];
        assert_eq!(
            style("font-family", value).unwrap().unwrap(),
            "font-family:Arial 'Open Sans' sans-serif;"
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(style("z-index", 10i64).unwrap().unwrap(), "z-index:10;");
        assert_eq!(style("opacity", 0.5).unwrap().unwrap(), "opacity:0.5;");
    }

    #[test]
    fn test_functions_allowed() {
        for value in [
            "calc(100% - 10px)",
            "rgb(0, 0, 0)",
            "translateX(10px)",
            "scale3d(1, 1, 1)",
            "var(--main-color)",
            "calc(1px + var(--x))",
            "linear-gradient(90deg, rgba(0,0,0,0.5), white)",
            "repeat(2, minmax(10px, 1fr))",
        ] {
            assert_eq!(lenient("x", value), format!("x:{};", value), "{}", value);
        }
    }

    #[test]
    fn test_disallowed_values_are_innocuous() {
        for value in [
            "expression(alert(1))",
            "{",
            "red}body{color:blue",
            "a/*comment*/",
            "'unbalanced",
            "\"unbalanced",
            "[a b]",
            "[a[b]]",
            "a]",
            "calc(1px + calc(2px + calc(3px)))",
            "<b>",
            "@import",
            "a\\62",
        ] {
            assert_eq!(lenient("x", value), "x:zClosurez;", "{}", value);
        }
    }

    #[test]
    #[should_panic(expected = "String value allows only")]
    fn test_disallowed_value_asserts() {
        Config::strict().scope(|| {
            let _ = style("font", "1em {");
        });
    }

    #[test]
    fn test_brace_in_const_is_error() {
        let err = style("x", Const::from_static("a;b")).unwrap_err();
        assert!(matches!(err, Error::InvalidPropertyValue(_)));
        assert_eq!(
            style("x", Const::from_static("expression(a)")).unwrap().unwrap(),
            "x:expression(a);"
        );
    }

    #[test]
    fn test_url_values() {
        assert_eq!(
            lenient("background", "url(http://example.com/a.png)"),
            "background:url(http://example.com/a.png);"
        );
        assert_eq!(
            lenient("background", "url('javascript:alert(1)')"),
            "background:url('about:invalid#zClosurez');"
        );
        assert_eq!(
            lenient("background", "url( \"/img.png\" ) no-repeat"),
            "background:url( \"/img.png\" ) no-repeat;"
        );
    }

    #[test]
    fn test_safe_url_value() {
        let url = SafeUrl::sanitize("https://example.com/a\"b<c.png");
        assert_eq!(
            style("background-image", url).unwrap().unwrap(),
            r#"background-image:url("https://example.com/a\"b%3cc.png");"#
        );
    }

    #[test]
    fn test_from_constant() {
        let style = SafeStyle::from_constant(Const::from_static("color:red;")).unwrap();
        assert_eq!(style.unwrap(), "color:red;");
        assert!(SafeStyle::from_constant(Const::EMPTY).unwrap().is_empty());
        assert!(SafeStyle::from_constant(Const::from_static("color:red")).is_err());
        assert!(SafeStyle::from_constant(Const::from_static("red;")).is_err());
    }

    #[test]
    fn test_concat() {
        let a = style("width", "1em").unwrap();
        let b = style("height", "2em").unwrap();
        assert_eq!(SafeStyle::concat([&a, &b]).unwrap(), "width:1em;height:2em;");
        assert!(SafeStyle::concat(&[] as &[SafeStyle]).is_empty());
    }

    #[test]
    fn test_balanced_helpers() {
        assert!(has_balanced_quotes("'a\"b'"));
        assert!(has_balanced_quotes("\"it's\""));
        assert!(!has_balanced_quotes("'a"));
        assert!(has_balanced_square_brackets("[a-b_c]"));
        assert!(!has_balanced_square_brackets("["));
        assert!(!has_balanced_square_brackets("[a.b]"));
    }
}
