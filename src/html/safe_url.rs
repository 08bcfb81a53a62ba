// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! `SafeUrl`: URLs safe to navigate to
//!
//! A `SafeUrl` can be used in `href`, `src` of images and similar
//! attributes: following it cannot execute script in the current origin.
//! It is *not* safe to load code from (see `TrustedResourceUrl`).
//!
//! Sanitization never fails. Input that does not match the allow-list is
//! replaced by [`INNOCUOUS_STRING`].

use std::any::Any;

use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;

use super::branded::{SafeValue, Url};
use super::TrustedResourceUrl;
use crate::asserts;
use crate::i18n::Dir;
use crate::string::escape::decode_uri_component;
use crate::string::{Const, DirectionalString, TypedString};

/// URL wrapper safe for navigation sinks
pub type SafeUrl = SafeValue<Url>;

/// Placeholder substituted for URLs that fail sanitization
pub const INNOCUOUS_STRING: &str = "about:invalid#zClosurez";

lazy_static! {
    /// Scheme absent, or one of http/https/mailto/ftp
    static ref SAFE_URL_PATTERN: Regex =
        Regex::new(r"(?i)^(?:(?:https?|mailto|ftp):|[^:/?#]*(?:[/?#]|$))").unwrap();

    static ref DATA_URL_PATTERN: Regex =
        Regex::new(r"(?i)^data:(.*);base64,[a-z0-9+/]+=*$").unwrap();

    static ref SAFE_MIME_TYPE_PATTERN: Regex = Regex::new(concat!(
        r"(?i)^(?:",
        r"audio/(?:3gpp2|3gpp|aac|L16|midi|mp3|mp4|mpeg|oga|ogg|opus|x-m4a|x-matroska|x-wav|wav|webm)",
        r"|font/[A-Za-z0-9_]+",
        r"|image/(?:bmp|gif|jpeg|jpg|png|tiff|webp|x-icon)",
        r"|video/(?:mpeg|mp4|ogg|webm|quicktime|x-matroska)",
        r#")(?:;[A-Za-z0-9_]+=(?:[A-Za-z0-9_]+|"[A-Za-z0-9_;,= ]+"))*$"#,
    ))
    .unwrap();

    static ref LINE_BREAK_ESCAPES: Regex = Regex::new(r"%0A|%0D").unwrap();

    static ref SIP_URL_PATTERN: Regex = Regex::new(
        r"(?i)^sips?:[+a-z0-9_.!$%&'*/=^`{|}~-]+@([a-z0-9-]+\.)+[a-z0-9]{2,63}$"
    )
    .unwrap();

    static ref SMS_BODY_PARAM: Regex = Regex::new(r"(?i)[?&]body=").unwrap();
    static ref SMS_BODY_VALUE: Regex = Regex::new(r"(?i)[?&]body=([^&]*)").unwrap();
    static ref SMS_BODY_CHARS: Regex = Regex::new(r"(?i)^(?:[a-z0-9\-_.~]|%[0-9a-f]{2})+$").unwrap();

    static ref CHROME_EXTENSION: Regex = Regex::new(r"^chrome-extension://([^/]+)/").unwrap();
    static ref FIREFOX_EXTENSION: Regex = Regex::new(r"^moz-extension://([^/]+)/").unwrap();
    static ref EDGE_EXTENSION: Regex = Regex::new(r"^ms-browser-extension://([^/]+)/").unwrap();
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// Whether `mime_type` is an audio, image, video or font type that is safe
/// to render from a `data:` URL
pub fn is_safe_mime_type(mime_type: &str) -> bool {
    SAFE_MIME_TYPE_PATTERN.is_match(mime_type)
}

impl SafeValue<Url> {
    /// `about:invalid#zClosurez`
    pub fn innocuous() -> SafeUrl {
        SafeUrl::from_trusted(INNOCUOUS_STRING, None)
    }

    /// `about:blank`
    pub fn about_blank() -> SafeUrl {
        SafeUrl::from_trusted("about:blank", None)
    }

    /// Wrap a program literal.
    ///
    /// The literal is trusted as written; it is not sanitized.
    pub fn from_constant(url: Const) -> SafeUrl {
        SafeUrl::from_trusted(url.unwrap(), None)
    }

    /// Sanitize `url`, substituting the innocuous URL if it is not safe.
    ///
    /// Allowed: relative URLs, and absolute URLs with an `http`, `https`,
    /// `mailto` or `ftp` scheme, plus `data:` URLs of safe media types.
    pub fn sanitize(url: &str) -> SafeUrl {
        SafeUrl::try_sanitize(url).unwrap_or_else(SafeUrl::innocuous)
    }

    /// Sanitize a typed string; a `SafeUrl` is returned unchanged.
    pub fn sanitize_typed<T: TypedString + Any>(value: &T) -> SafeUrl {
        match (value as &dyn Any).downcast_ref::<SafeUrl>() {
            Some(url) => url.clone(),
            None => SafeUrl::sanitize(value.typed_string_value()),
        }
    }

    /// Like [`sanitize`](Self::sanitize) but returns `None` instead of the
    /// innocuous URL.
    pub fn try_sanitize(url: &str) -> Option<SafeUrl> {
        if !SAFE_URL_PATTERN.is_match(url) {
            return SafeUrl::try_from_data_url(url);
        }
        Some(SafeUrl::from_trusted(url, None))
    }

    /// Sanitize a URL the caller expects to already be safe.
    ///
    /// A URL that would be changed by sanitization raises an assertion
    /// failure; with assertions off it degrades to the innocuous URL.
    pub fn sanitize_assert_unchanged(url: &str, allow_data_url: bool) -> SafeUrl {
        if allow_data_url && starts_with_ignore_case(url, "data:") {
            let safe = SafeUrl::from_data_url(url);
            if safe.unwrap() == url {
                return safe;
            }
        }
        let safe = asserts::check(SAFE_URL_PATTERN.is_match(url), || {
            format!("{} does not match the safe URL pattern", url)
        });
        if safe {
            SafeUrl::from_trusted(url, None)
        } else {
            SafeUrl::innocuous()
        }
    }

    /// Accept a base64 `data:` URL of a safe media type.
    ///
    /// Encoded line breaks (`%0A`, `%0D`) are removed first.
    pub fn try_from_data_url(data_url: &str) -> Option<SafeUrl> {
        let filtered = LINE_BREAK_ESCAPES.replace_all(data_url, "");
        let valid = DATA_URL_PATTERN
            .captures(&filtered)
            .map_or(false, |caps| is_safe_mime_type(&caps[1]));
        valid.then(|| SafeUrl::from_trusted(filtered.into_owned(), None))
    }

    /// [`try_from_data_url`](Self::try_from_data_url), innocuous on failure
    pub fn from_data_url(data_url: &str) -> SafeUrl {
        SafeUrl::try_from_data_url(data_url).unwrap_or_else(SafeUrl::innocuous)
    }

    /// Encode `bytes` as a base64 `data:` URL if `mime_type` is safe
    pub fn from_blob(mime_type: &str, bytes: &[u8]) -> SafeUrl {
        if mime_type.is_empty() || !is_safe_mime_type(mime_type) {
            return SafeUrl::innocuous();
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        SafeUrl::from_trusted(format!("data:{};base64,{}", mime_type, encoded), None)
    }

    /// Accept a `tel:` URL.
    ///
    /// Separate from [`sanitize`](Self::sanitize) because following a
    /// `tel:` link may place a call without confirmation.
    pub fn from_tel_url(tel_url: &str) -> SafeUrl {
        SafeUrl::with_prefix(tel_url, "tel:")
    }

    /// Accept a `sip:`/`sips:` URL of the form `sip:user@host.tld`
    pub fn from_sip_url(sip_url: &str) -> SafeUrl {
        let valid = decode_uri_component(sip_url)
            .map_or(false, |decoded| SIP_URL_PATTERN.is_match(&decoded));
        if valid {
            SafeUrl::from_trusted(sip_url, None)
        } else {
            SafeUrl::innocuous()
        }
    }

    /// Accept an `sms:` URL whose optional `body` parameter is well formed
    pub fn from_sms_url(sms_url: &str) -> SafeUrl {
        if starts_with_ignore_case(sms_url, "sms:") && is_sms_body_valid(sms_url) {
            SafeUrl::from_trusted(sms_url, None)
        } else {
            SafeUrl::innocuous()
        }
    }

    /// Accept an `ssh://` URL
    pub fn from_ssh_url(ssh_url: &str) -> SafeUrl {
        SafeUrl::with_prefix(ssh_url, "ssh://")
    }

    /// Accept an `fb-messenger://share` URL
    pub fn from_facebook_messenger_url(url: &str) -> SafeUrl {
        SafeUrl::with_prefix(url, "fb-messenger://share")
    }

    /// Accept a `whatsapp://send` URL
    pub fn from_whatsapp_url(url: &str) -> SafeUrl {
        SafeUrl::with_prefix(url, "whatsapp://send")
    }

    /// Accept a `chrome-extension://` URL of one of `extension_ids`
    pub fn sanitize_chrome_extension_url(url: &str, extension_ids: &[Const]) -> SafeUrl {
        sanitize_extension_url(&CHROME_EXTENSION, url, extension_ids)
    }

    /// Accept a `moz-extension://` URL of one of `extension_ids`
    pub fn sanitize_firefox_extension_url(url: &str, extension_ids: &[Const]) -> SafeUrl {
        sanitize_extension_url(&FIREFOX_EXTENSION, url, extension_ids)
    }

    /// Accept an `ms-browser-extension://` URL of one of `extension_ids`
    pub fn sanitize_edge_extension_url(url: &str, extension_ids: &[Const]) -> SafeUrl {
        sanitize_extension_url(&EDGE_EXTENSION, url, extension_ids)
    }

    /// Narrow a resource URL; always succeeds
    pub fn from_trusted_resource_url(url: &TrustedResourceUrl) -> SafeUrl {
        SafeUrl::from_trusted(url.unwrap(), None)
    }

    fn with_prefix(url: &str, prefix: &str) -> SafeUrl {
        if starts_with_ignore_case(url, prefix) {
            SafeUrl::from_trusted(url, None)
        } else {
            SafeUrl::innocuous()
        }
    }
}

impl Default for SafeValue<Url> {
    fn default() -> Self {
        SafeUrl::innocuous()
    }
}

/// A `SafeUrl`, or text to sanitize into one
#[derive(Debug, Clone)]
pub enum UrlSource {
    /// Already safe, used as is
    Safe(SafeUrl),
    /// Untrusted text, passed through [`SafeUrl::sanitize`]
    Text(String),
}

impl UrlSource {
    /// Resolve to a `SafeUrl`
    pub fn into_safe_url(self) -> SafeUrl {
        match self {
            UrlSource::Safe(url) => url,
            UrlSource::Text(text) => SafeUrl::sanitize(&text),
        }
    }
}

impl From<SafeUrl> for UrlSource {
    fn from(url: SafeUrl) -> Self {
        UrlSource::Safe(url)
    }
}

impl From<&SafeUrl> for UrlSource {
    fn from(url: &SafeUrl) -> Self {
        UrlSource::Safe(url.clone())
    }
}

impl From<&str> for UrlSource {
    fn from(text: &str) -> Self {
        UrlSource::Text(text.to_string())
    }
}

impl From<String> for UrlSource {
    fn from(text: String) -> Self {
        UrlSource::Text(text)
    }
}

impl DirectionalString for SafeValue<Url> {
    /// URLs are always left-to-right
    fn direction(&self) -> Option<Dir> {
        Some(Dir::Ltr)
    }
}

fn is_sms_body_valid(sms_url: &str) -> bool {
    let without_fragment = match sms_url.find('#') {
        Some(hash) if hash > 0 => &sms_url[..hash],
        _ => sms_url,
    };

    match SMS_BODY_PARAM.find_iter(without_fragment).count() {
        // Body is optional
        0 => return true,
        1 => {}
        // and may appear only once
        _ => return false,
    }

    let body = match SMS_BODY_VALUE.captures(without_fragment) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => return true,
    };
    if body.is_empty() {
        return true;
    }

    decode_uri_component(body).is_some() && SMS_BODY_CHARS.is_match(body)
}

fn sanitize_extension_url(scheme: &Regex, url: &str, extension_ids: &[Const]) -> SafeUrl {
    let accepted = scheme
        .captures(url)
        .map_or(false, |caps| extension_ids.iter().any(|id| id.unwrap() == &caps[1]));
    if accepted {
        SafeUrl::from_trusted(url, None)
    } else {
        SafeUrl::innocuous()
    }
}
