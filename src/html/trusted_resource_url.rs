// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! `TrustedResourceUrl`: URLs trusted to load code
//!
//! Suitable for `<script src>`, stylesheet `href`, worker URLs and similar
//! sinks where the target is executed. Such a URL can only be assembled from
//! program literals; dynamic data may appear only in `%{name}` placeholders
//! of a literal template, and is percent-encoded there. Because the template
//! has to start with a fixed origin or path, a substituted value can never
//! change the scheme or host.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::branded::{ResourceUrl, SafeValue};
use crate::error::{Error, Result};
use crate::string::escape::encode_uri_component;
use crate::string::Const;

/// URL wrapper safe for code-loading sinks
pub type TrustedResourceUrl = SafeValue<ResourceUrl>;

lazy_static! {
    static ref FORMAT_MARKER: Regex = Regex::new(r"%\{(\w+)\}").unwrap();
    static ref BASE_URL: Regex = Regex::new(concat!(
        r"(?i)^(",
        r"(https:)?//[0-9a-z.:\[\]-]+/", // Origin
        r"|/[^/\\]",                     // Absolute path
        r"|[^:/\\%]+/",                  // Relative path
        r"|[^:/\\%]*[?#]",               // Query string or fragment
        r"|about:blank#",
        r")",
    ))
    .unwrap();
    static ref URL_PARTS: Regex = Regex::new(r"^([^?#]*)(\?[^#]*)?(#[\s\S]*)?").unwrap();
}

/// Argument substituted into a `%{name}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatArg {
    /// Program literal, inserted as written
    Const(Const),
    /// Dynamic value, inserted percent-encoded
    Value(String),
}

impl From<Const> for FormatArg {
    fn from(value: Const) -> Self {
        FormatArg::Const(value)
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Value(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Value(value)
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        FormatArg::Value(value.to_string())
    }
}

/// Named placeholder arguments
pub type FormatArgs = HashMap<String, FormatArg>;

/// How to update the query or fragment in
/// [`clone_with_params`](SafeValue::clone_with_params)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlParams {
    /// Replace the whole section with one encoded value; empty removes it
    Replace(String),
    /// Append `key=value` pairs; `None` values are skipped
    Append(Vec<(String, Option<String>)>),
}

impl UrlParams {
    /// Append pairs built from anything string-like
    pub fn append<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        UrlParams::Append(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}

impl SafeValue<ResourceUrl> {
    /// Wrap a program literal
    pub fn from_constant(url: Const) -> TrustedResourceUrl {
        TrustedResourceUrl::from_trusted(url.unwrap(), None)
    }

    /// Join program literals
    pub fn from_constants(parts: &[Const]) -> TrustedResourceUrl {
        let url: String = parts.iter().map(Const::unwrap).collect();
        TrustedResourceUrl::from_trusted(url, None)
    }

    /// Fill `%{name}` placeholders of a literal template.
    ///
    /// The template must begin with an `https://` or `//` origin followed by
    /// `/`, an absolute or relative path, a query or fragment, or
    /// `about:blank#`. `Const` arguments are inserted verbatim, others are
    /// percent-encoded like `encodeURIComponent`.
    pub fn format(format: Const, args: &FormatArgs) -> Result<TrustedResourceUrl> {
        let template = format.unwrap();
        if !BASE_URL.is_match(template) {
            return Err(Error::InvalidResourceUrlFormat(template.to_string()));
        }

        let mut missing = None;
        let url = FORMAT_MARKER.replace_all(template, |caps: &Captures| {
            match args.get(&caps[1]) {
                Some(FormatArg::Const(value)) => value.unwrap().to_string(),
                Some(FormatArg::Value(value)) => encode_uri_component(value),
                None => {
                    missing.get_or_insert_with(|| caps[1].to_string());
                    String::new()
                }
            }
        });
        if let Some(marker) = missing {
            return Err(Error::MissingFormatArgument {
                marker,
                format: template.to_string(),
            });
        }

        Ok(TrustedResourceUrl::from_trusted(url.into_owned(), None))
    }

    /// [`format`](Self::format) followed by
    /// [`clone_with_params`](Self::clone_with_params)
    pub fn format_with_params(
        format: Const,
        args: &FormatArgs,
        search: Option<&UrlParams>,
        hash: Option<&UrlParams>,
    ) -> Result<TrustedResourceUrl> {
        Ok(Self::format(format, args)?.clone_with_params(search, hash))
    }

    /// Copy with an updated query string and fragment.
    ///
    /// The part before `?`/`#` is kept as is, so the validated origin and
    /// path cannot change.
    pub fn clone_with_params(
        &self,
        search: Option<&UrlParams>,
        hash: Option<&UrlParams>,
    ) -> TrustedResourceUrl {
        let url = self.unwrap();
        let (base, current_search, current_hash) = match URL_PARTS.captures(url) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
                caps.get(3).map_or("", |m| m.as_str()),
            ),
            None => (url, "", ""),
        };
        TrustedResourceUrl::from_trusted(
            format!(
                "{}{}{}",
                base,
                stringify_params('?', current_search, search),
                stringify_params('#', current_hash, hash)
            ),
            None,
        )
    }
}

fn stringify_params(prefix: char, current: &str, params: Option<&UrlParams>) -> String {
    match params {
        None => current.to_string(),
        Some(UrlParams::Replace(value)) if value.is_empty() => String::new(),
        Some(UrlParams::Replace(value)) => format!("{}{}", prefix, encode_uri_component(value)),
        Some(UrlParams::Append(pairs)) => {
            let mut out = current.to_string();
            for (key, value) in pairs {
                let Some(value) = value else { continue };
                if out.is_empty() {
                    out.push(prefix);
                }
                if out.len() > prefix.len_utf8() {
                    out.push('&');
                }
                out.push_str(&encode_uri_component(key));
                out.push('=');
                out.push_str(&encode_uri_component(value));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, FormatArg)]) -> FormatArgs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_from_constants() {
        let url = TrustedResourceUrl::from_constants(&[
            Const::from_static("https://cdn.example.com/"),
            Const::from_static("lib.js"),
        ]);
        assert_eq!(url.unwrap(), "https://cdn.example.com/lib.js");
    }

    #[test]
    fn test_format_encodes_dynamic_values() {
        let url = TrustedResourceUrl::format(
            Const::from_static("https://example.com/%{dir}/%{file}.js"),
            &args(&[
                ("dir", Const::from_static("static/v1").into()),
                ("file", "../../evil?x=1".into()),
            ]),
        )
        .unwrap();
        assert_eq!(url.unwrap(), "https://example.com/static/v1/..%2F..%2Fevil%3Fx%3D1.js");
    }

    #[test]
    fn test_format_valid_bases() {
        for template in [
            "https://example.com/%{x}",
            "//example.com/%{x}",
            "https://[::1]:8080/%{x}",
            "/path/%{x}",
            "relative/%{x}",
            "?q=%{x}",
            "#%{x}",
            "about:blank#%{x}",
        ] {
            let format = Const::from_static(template);
            assert!(
                TrustedResourceUrl::format(format, &args(&[("x", "v".into())])).is_ok(),
                "{}",
                template
            );
        }
    }

    #[test]
    fn test_format_invalid_bases() {
        for template in [
            "%{x}",
            "http://example.com/%{x}",
            "https://example.com%{x}",
            "//%{x}/",
            "javascript:%{x}",
            "//example.com",
            "/\\example.com/%{x}",
            "//",
        ] {
            let err = TrustedResourceUrl::format(
                Const::from_static(template),
                &args(&[("x", "v".into())]),
            )
            .unwrap_err();
            assert!(matches!(err, Error::InvalidResourceUrlFormat(_)), "{}", template);
        }
    }

    #[test]
    fn test_format_missing_argument() {
        let err = TrustedResourceUrl::format(Const::from_static("/a/%{b}"), &FormatArgs::new())
            .unwrap_err();
        match err {
            Error::MissingFormatArgument { marker, format } => {
                assert_eq!(marker, "b");
                assert_eq!(format, "/a/%{b}");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_clone_with_params_append() {
        let url = TrustedResourceUrl::from_constant(Const::from_static("https://example.com/a?x=1#h"));
        let updated = url.clone_with_params(
            Some(&UrlParams::Append(vec![
                ("y".to_string(), Some("a b".to_string())),
                ("skip".to_string(), None),
                ("z".to_string(), Some("&".to_string())),
            ])),
            None,
        );
        assert_eq!(updated.unwrap(), "https://example.com/a?x=1&y=a%20b&z=%26#h");
    }

    #[test]
    fn test_clone_with_params_new_sections() {
        let url = TrustedResourceUrl::from_constant(Const::from_static("/script.js"));
        let updated = url.clone_with_params(
            Some(&UrlParams::append([("v", "2")])),
            Some(&UrlParams::Replace("frag ment".to_string())),
        );
        assert_eq!(updated.unwrap(), "/script.js?v=2#frag%20ment");
    }

    #[test]
    fn test_clone_with_params_replace_and_remove() {
        let url = TrustedResourceUrl::from_constant(Const::from_static("/a?old=1#old"));
        let updated = url.clone_with_params(
            Some(&UrlParams::Replace("x".to_string())),
            Some(&UrlParams::Replace(String::new())),
        );
        assert_eq!(updated.unwrap(), "/a?x");
    }

    #[test]
    fn test_format_with_params() {
        let url = TrustedResourceUrl::format_with_params(
            Const::from_static("https://example.com/%{name}.js"),
            &args(&[("name", "a/b".into())]),
            Some(&UrlParams::append([("callback", "init")])),
            None,
        )
        .unwrap();
        assert_eq!(url.unwrap(), "https://example.com/a%2Fb.js?callback=init");
    }
}
