// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! `SafeHtml`: markup safe for element content
//!
//! Markup is built from three sources:
//!
//! - Text, which is always HTML-escaped
//! - Other `SafeHtml` values, inserted as is
//! - Element builders, which validate tag and attribute names and resolve
//!   each attribute value according to its sink (`on*` handlers, URL
//!   attributes, `style`)
//!
//! Tags that load code or change document metadata are refused by
//! [`create`](SafeValue::create); dedicated builders fix their
//! security-relevant attributes instead.

use std::any::Any;
use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use super::branded::{Html, SafeKind, SafeValue};
use super::safe_style::{StyleMap, StyleSource};
use super::safe_url::UrlSource;
use super::tags;
use super::{SafeScript, SafeStyle, SafeStyleSheet, SafeUrl, TrustedResourceUrl};
use crate::config::{self, SUPPORT_STYLE_ATTRIBUTE};
use crate::error::{Error, Result};
use crate::i18n::Dir;
use crate::string::escape;
use crate::string::{Const, DirectionalString, TypedString};

/// Markup wrapper safe for element content
pub type SafeHtml = SafeValue<Html>;

lazy_static! {
    static ref VALID_NAME: Regex = Regex::new(r"^[a-zA-Z0-9-]+$").unwrap();
    static ref DIR_VALUE: Regex = Regex::new(r"(?i)^(ltr|rtl|auto)$").unwrap();
}

/// Attributes whose value is a URL
const URL_ATTRIBUTES: &[&str] = &[
    "action",
    "cite",
    "data",
    "formaction",
    "href",
    "manifest",
    "poster",
    "src",
];

/// Attributes `create_script` does not let the caller set
const FORBIDDEN_SCRIPT_ATTRIBUTES: &[&str] = &["language", "src", "text", "type"];

type Escaper = fn(&str) -> String;

/// Element content: text to escape, markup, or a list of both
#[derive(Debug, Clone)]
pub enum Content {
    /// Inserted as is
    Html(SafeHtml),
    /// Escaped before insertion
    Text { text: String, dir: Option<Dir> },
    /// Concatenated
    List(Vec<Content>),
}

impl Content {
    /// No content
    pub fn empty() -> Self {
        Content::List(Vec::new())
    }

    /// Text of unknown direction
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text {
            text: text.into(),
            dir: None,
        }
    }

    /// Text that carries its own direction
    pub fn directional<T: TypedString + DirectionalString + ?Sized>(value: &T) -> Self {
        Content::Text {
            text: value.typed_string_value().to_string(),
            dir: value.direction(),
        }
    }

    /// Any typed string. A `SafeHtml` is kept as markup; everything else,
    /// whatever it claims to be, is escaped.
    pub fn typed<T: TypedString + Any>(value: &T) -> Self {
        match (value as &dyn Any).downcast_ref::<SafeHtml>() {
            Some(html) => Content::Html(html.clone()),
            None => Content::text(value.typed_string_value()),
        }
    }

    fn leaves<'a>(&'a self, out: &mut Vec<Leaf<'a>>) {
        match self {
            Content::Html(html) => out.push(Leaf::Html(html)),
            Content::Text { text, dir } => out.push(Leaf::Text(text, *dir)),
            Content::List(items) => items.iter().for_each(|item| item.leaves(out)),
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::empty()
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::text(text)
    }
}

impl From<Const> for Content {
    fn from(text: Const) -> Self {
        Content::text(text.unwrap())
    }
}

impl From<SafeHtml> for Content {
    fn from(html: SafeHtml) -> Self {
        Content::Html(html)
    }
}

impl From<&SafeHtml> for Content {
    fn from(html: &SafeHtml) -> Self {
        Content::Html(html.clone())
    }
}

impl<T: Into<Content>> From<Vec<T>> for Content {
    fn from(items: Vec<T>) -> Self {
        Content::List(items.into_iter().map(Into::into).collect())
    }
}

enum Leaf<'a> {
    Html(&'a SafeHtml),
    Text(&'a str, Option<Dir>),
}

/// Value of an element attribute
#[derive(Debug, Clone)]
pub enum AttributeValue {
    /// Program literal; the only value accepted by `on*` handlers
    Const(Const),
    /// Untrusted text. Sanitized in URL attributes, escaped everywhere.
    Text(String),
    /// Number
    Int(i64),
    /// Navigable URL
    Url(SafeUrl),
    /// Code-loading URL
    ResourceUrl(TrustedResourceUrl),
    /// Value of the `style` attribute
    Style(StyleSource),
    /// Other safe value, used as text
    Typed { kind: &'static str, text: String },
    /// Omit the attribute
    Skip,
}

impl AttributeValue {
    fn typed<K: SafeKind>(value: SafeValue<K>) -> Self {
        AttributeValue::Typed {
            kind: K::NAME,
            text: value.into_string(),
        }
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            AttributeValue::Const(value) => Some(Cow::Borrowed(value.unwrap())),
            AttributeValue::Text(text) => Some(Cow::Borrowed(text)),
            AttributeValue::Int(value) => Some(Cow::Owned(value.to_string())),
            AttributeValue::Url(url) => Some(Cow::Borrowed(url.unwrap())),
            AttributeValue::ResourceUrl(url) => Some(Cow::Borrowed(url.unwrap())),
            AttributeValue::Style(StyleSource::Safe(style)) => Some(Cow::Borrowed(style.unwrap())),
            AttributeValue::Typed { text, .. } => Some(Cow::Borrowed(text)),
            AttributeValue::Style(StyleSource::Map(_)) | AttributeValue::Skip => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            AttributeValue::Url(url) => format!("{:?}", url),
            AttributeValue::ResourceUrl(url) => format!("{:?}", url),
            AttributeValue::Style(StyleSource::Safe(style)) => format!("{:?}", style),
            AttributeValue::Style(StyleSource::Map(_)) => "map of style properties".to_string(),
            AttributeValue::Typed { kind, text } => format!("{}{{{}}}", kind, text),
            AttributeValue::Skip => "nothing".to_string(),
            other => other.text().map(Cow::into_owned).unwrap_or_default(),
        }
    }
}

impl From<Const> for AttributeValue {
    fn from(value: Const) -> Self {
        AttributeValue::Const(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Int(value.into())
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::Int(value.into())
    }
}

impl From<SafeUrl> for AttributeValue {
    fn from(url: SafeUrl) -> Self {
        AttributeValue::Url(url)
    }
}

impl From<TrustedResourceUrl> for AttributeValue {
    fn from(url: TrustedResourceUrl) -> Self {
        AttributeValue::ResourceUrl(url)
    }
}

impl From<SafeStyle> for AttributeValue {
    fn from(style: SafeStyle) -> Self {
        AttributeValue::Style(StyleSource::Safe(style))
    }
}

impl From<StyleMap> for AttributeValue {
    fn from(map: StyleMap) -> Self {
        AttributeValue::Style(StyleSource::Map(map))
    }
}

impl From<SafeHtml> for AttributeValue {
    fn from(html: SafeHtml) -> Self {
        AttributeValue::typed(html)
    }
}

impl From<SafeScript> for AttributeValue {
    fn from(script: SafeScript) -> Self {
        AttributeValue::typed(script)
    }
}

impl From<SafeStyleSheet> for AttributeValue {
    fn from(sheet: SafeStyleSheet) -> Self {
        AttributeValue::typed(sheet)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttributeValue::Skip, Into::into)
    }
}

/// Ordered element attributes
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing an earlier value with the same name
    pub fn set(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name.into(), value.into());
        self
    }

    /// Value of the attribute named exactly `name`
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Whether no attribute is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    fn insert(&mut self, name: String, value: AttributeValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }
}

impl<N: Into<String>, V: Into<AttributeValue>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Attributes::new(), |attrs, (name, value)| attrs.set(name, value))
    }
}

impl SafeValue<Html> {
    /// The empty markup
    pub fn empty() -> SafeHtml {
        SafeHtml::from_trusted("", Some(Dir::Neutral))
    }

    /// `<!DOCTYPE html>`
    pub fn doctype_html() -> SafeHtml {
        SafeHtml::from_trusted("<!DOCTYPE html>", Some(Dir::Neutral))
    }

    /// `<br>`
    pub fn br() -> SafeHtml {
        SafeHtml::from_trusted("<br>", Some(Dir::Neutral))
    }

    /// Escape text; markup is returned unchanged
    pub fn html_escape(content: impl Into<Content>) -> SafeHtml {
        escape_with(content.into(), escape::html_escape)
    }

    /// Like [`html_escape`](Self::html_escape), with line breaks turned into
    /// `<br>`
    pub fn html_escape_preserving_newlines(content: impl Into<Content>) -> SafeHtml {
        escape_with(content.into(), escape_preserving_newlines)
    }

    /// Like [`html_escape_preserving_newlines`](Self::html_escape_preserving_newlines),
    /// with runs of spaces kept visible
    pub fn html_escape_preserving_newlines_and_spaces(content: impl Into<Content>) -> SafeHtml {
        escape_with(content.into(), escape_preserving_whitespace)
    }

    /// `<!--text-->` with `text` escaped
    pub fn comment(text: &str) -> SafeHtml {
        SafeHtml::from_trusted(format!("<!--{}-->", escape::html_escape(text)), None)
    }

    /// Concatenate contents, escaping text
    pub fn concat<I>(contents: I) -> SafeHtml
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        SafeHtml::join(SafeHtml::empty(), contents)
    }

    /// [`concat`](Self::concat) with an explicit direction
    pub fn concat_with_dir<I>(dir: Dir, contents: I) -> SafeHtml
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        SafeHtml::concat(contents).with_dir(Some(dir))
    }

    /// Concatenate contents with `separator` between every two leaves.
    ///
    /// Nested lists are flattened first. The result has a known direction
    /// only if every piece shares it (neutral pieces aside).
    pub fn join<I>(separator: impl Into<Content>, parts: I) -> SafeHtml
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        let separator = SafeHtml::html_escape(separator);
        let parts: Vec<Content> = parts.into_iter().map(Into::into).collect();
        let mut leaves = Vec::new();
        parts.iter().for_each(|part| part.leaves(&mut leaves));
        join_leaves(&separator, &leaves, escape::html_escape)
    }

    /// Build an element.
    ///
    /// Tag and attribute names must match `[a-zA-Z0-9-]+`. The tags
    /// `applet base embed iframe link math meta object script style svg
    /// template` are refused; use the dedicated builders.
    pub fn create(
        tag: &str,
        attributes: &Attributes,
        content: impl Into<Content>,
    ) -> Result<SafeHtml> {
        verify_tag_name(tag)?;
        create_element(tag, attributes, content.into())
    }

    /// [`create`](Self::create) with an explicit direction
    pub fn create_with_dir(
        dir: Dir,
        tag: &str,
        attributes: &Attributes,
        content: impl Into<Content>,
    ) -> Result<SafeHtml> {
        Ok(SafeHtml::create(tag, attributes, content)?.with_dir(Some(dir)))
    }

    /// `<script>` with the given bodies.
    ///
    /// `language`, `src`, `text` and `type` cannot be set.
    pub fn create_script(scripts: &[SafeScript], attributes: &Attributes) -> Result<SafeHtml> {
        for (name, _) in attributes.iter() {
            let lower = name.to_ascii_lowercase();
            if FORBIDDEN_SCRIPT_ATTRIBUTES.contains(&lower.as_str()) {
                return Err(Error::ForbiddenAttribute(lower));
            }
        }

        let body: String = scripts.iter().map(SafeScript::unwrap).collect();
        let body = SafeHtml::from_trusted(body, Some(Dir::Neutral));
        create_element("script", attributes, body.into())
    }

    /// `<script src=...>`; `src` cannot be overridden
    pub fn create_script_src(src: &TrustedResourceUrl, attributes: &Attributes) -> Result<SafeHtml> {
        let fixed = Attributes::new().set("src", src.clone());
        let combined = combine_attributes(&fixed, &Attributes::new(), attributes)?;
        create_element("script", &combined, Content::empty())
    }

    /// `<style type="text/css">` with the given rules; `type` cannot be
    /// overridden
    pub fn create_style(sheets: &[SafeStyleSheet], attributes: &Attributes) -> Result<SafeHtml> {
        let fixed = Attributes::new().set("type", Const::from_static("text/css"));
        let combined = combine_attributes(&fixed, &Attributes::new(), attributes)?;

        let body: String = sheets.iter().map(SafeStyleSheet::unwrap).collect();
        let body = SafeHtml::from_trusted(body, Some(Dir::Neutral));
        create_element("style", &combined, body.into())
    }

    /// `<iframe>` loading a trusted URL or inline markup.
    ///
    /// `src` and `srcdoc` cannot be overridden. `sandbox=""` is set unless
    /// the caller gives its own `sandbox`.
    pub fn create_iframe(
        src: Option<&TrustedResourceUrl>,
        srcdoc: Option<&SafeHtml>,
        attributes: &Attributes,
        content: impl Into<Content>,
    ) -> Result<SafeHtml> {
        let fixed = Attributes::new()
            .set("src", src.cloned())
            .set("srcdoc", srcdoc.map(|html| html.unwrap().to_string()));
        let defaults = Attributes::new().set("sandbox", "");
        let combined = combine_attributes(&fixed, &defaults, attributes)?;
        create_element("iframe", &combined, content.into())
    }

    /// `<iframe sandbox="">` for untrusted URLs or markup.
    ///
    /// `src` is sanitized and `srcdoc` escaped; neither, nor `sandbox`, can
    /// be overridden. Fails when the host cannot sandbox iframes, since the
    /// content would otherwise run unsandboxed.
    pub fn create_sandbox_iframe(
        src: Option<UrlSource>,
        srcdoc: Option<&str>,
        attributes: &Attributes,
        content: impl Into<Content>,
    ) -> Result<SafeHtml> {
        if !SafeHtml::can_use_sandbox_iframe() {
            return Err(Error::SandboxUnsupported);
        }

        let fixed = Attributes::new()
            .set("src", src.map(UrlSource::into_safe_url))
            .set("srcdoc", srcdoc)
            .set("sandbox", "");
        let combined = combine_attributes(&fixed, &Attributes::new(), attributes)?;
        create_element("iframe", &combined, content.into())
    }

    /// Whether [`create_sandbox_iframe`](Self::create_sandbox_iframe) can
    /// be used
    pub fn can_use_sandbox_iframe() -> bool {
        config::current().sandbox_iframe_supported
    }

    /// `<meta http-equiv="refresh">` redirecting to a sanitized URL after
    /// `secs` seconds
    pub fn create_meta_refresh(url: impl Into<UrlSource>, secs: u32) -> SafeHtml {
        let mut url = url.into().into_safe_url().into_string();
        // Some hosts cut the URL at ';' unless it is quoted
        if config::current().quote_meta_refresh_urls && url.contains(';') {
            url = format!("'{}'", url.replace('\'', "%27"));
        }

        let content = format!("{}; url={}", secs, url);
        SafeHtml::from_trusted(
            format!(
                "<meta http-equiv=\"refresh\" content=\"{}\">",
                escape::html_escape(&content)
            ),
            None,
        )
    }
}

impl Default for SafeValue<Html> {
    fn default() -> Self {
        SafeHtml::empty()
    }
}

impl DirectionalString for SafeValue<Html> {
    fn direction(&self) -> Option<Dir> {
        self.dir()
    }
}

fn escape_preserving_newlines(text: &str) -> String {
    escape::newline_to_br(&escape::html_escape(text))
}

fn escape_preserving_whitespace(text: &str) -> String {
    escape::whitespace_escape(&escape::html_escape(text))
}

fn escape_with(content: Content, escape: Escaper) -> SafeHtml {
    match content {
        Content::Html(html) => html,
        Content::Text { text, dir } => SafeHtml::from_trusted(escape(&text), dir),
        list @ Content::List(_) => {
            let mut leaves = Vec::new();
            list.leaves(&mut leaves);
            join_leaves(&SafeHtml::empty(), &leaves, escape)
        }
    }
}

fn join_leaves(separator: &SafeHtml, leaves: &[Leaf<'_>], escape: Escaper) -> SafeHtml {
    let mut dir = separator.dir();
    let mut text = String::new();
    for (i, leaf) in leaves.iter().enumerate() {
        if i > 0 {
            text.push_str(separator.unwrap());
        }
        let leaf_dir = match leaf {
            Leaf::Html(html) => {
                text.push_str(html.unwrap());
                html.dir()
            }
            Leaf::Text(value, value_dir) => {
                text.push_str(&escape(value));
                *value_dir
            }
        };
        dir = Dir::combine(dir, leaf_dir);
    }
    SafeHtml::from_trusted(text, dir)
}

fn verify_tag_name(tag: &str) -> Result<()> {
    if !VALID_NAME.is_match(tag) {
        return Err(Error::InvalidTagName(tag.to_string()));
    }
    if tags::is_not_allowed_tag(tag) {
        return Err(Error::TagNotAllowed(tag.to_string()));
    }
    Ok(())
}

/// Layer caller attributes over fixed and default ones.
///
/// Fixed and default names are lowercase. A caller attribute matching a
/// fixed one (case-insensitive) is an error; one matching a default
/// replaces it.
fn combine_attributes(
    fixed: &Attributes,
    defaults: &Attributes,
    attributes: &Attributes,
) -> Result<Attributes> {
    let mut combined = fixed.clone();
    for (name, value) in defaults.iter() {
        combined.insert(name.to_string(), value.clone());
    }

    for (name, value) in attributes.iter() {
        let lower = name.to_ascii_lowercase();
        if fixed.get(&lower).is_some() {
            return Err(Error::AttributeOverride {
                name: lower,
                given: name.to_string(),
            });
        }
        if defaults.get(&lower).is_some() {
            combined.remove(&lower);
        }
        combined.insert(name.to_string(), value.clone());
    }
    Ok(combined)
}

/// Build an element without checking the tag against the deny list
fn create_element(tag: &str, attributes: &Attributes, content: Content) -> Result<SafeHtml> {
    let mut html = format!("<{}", tag);
    for (name, value) in attributes.iter() {
        if !VALID_NAME.is_match(name) {
            return Err(Error::InvalidAttributeName(name.to_string()));
        }
        if let Some(attribute) = render_attribute(tag, name, value)? {
            html.push(' ');
            html.push_str(&attribute);
        }
    }

    let body = SafeHtml::concat([content]);
    let mut dir = None;
    if tags::is_void_tag(tag) {
        if !body.is_empty() {
            return Err(Error::VoidTagContent(tag.to_string()));
        }
        html.push('>');
    } else {
        html.push('>');
        html.push_str(body.unwrap());
        html.push_str("</");
        html.push_str(tag);
        html.push('>');
        dir = body.dir();
    }

    if let Some(value) = attributes.get("dir").and_then(AttributeValue::text) {
        if !value.is_empty() {
            dir = DIR_VALUE.is_match(&value).then_some(Dir::Neutral);
        }
    }

    Ok(SafeHtml::from_trusted(html, dir))
}

fn is_event_handler(name: &str) -> bool {
    name.get(..2)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("on"))
}

fn is_url_attribute(name: &str) -> bool {
    URL_ATTRIBUTES.iter().any(|url| url.eq_ignore_ascii_case(name))
}

/// Render `name="value"`, `None` for a skipped attribute
fn render_attribute(tag: &str, name: &str, value: &AttributeValue) -> Result<Option<String>> {
    let text: Cow<'_, str> = match value {
        AttributeValue::Skip => return Ok(None),
        AttributeValue::Const(value) => Cow::Borrowed(value.unwrap()),
        _ if name.eq_ignore_ascii_case("style") => Cow::Owned(style_value(tag, name, value)?),
        _ if is_event_handler(name) => {
            return Err(Error::ConstRequired {
                name: name.to_string(),
                value: value.describe(),
            })
        }
        _ if is_url_attribute(name) => url_value(tag, name, value)?,
        AttributeValue::Style(StyleSource::Map(_)) => {
            return Err(Error::unexpected_value(
                tag,
                name,
                "a string, number or typed string",
                value.describe(),
            ))
        }
        other => other.text().unwrap_or_default(),
    };
    Ok(Some(format!("{}=\"{}\"", name, escape::html_escape(&text))))
}

fn style_value(tag: &str, name: &str, value: &AttributeValue) -> Result<String> {
    if !SUPPORT_STYLE_ATTRIBUTE {
        return Err(Error::StyleAttributeNotSupported);
    }
    match value {
        AttributeValue::Style(style) => Ok(style.clone().into_safe_style()?.into_string()),
        other => Err(Error::unexpected_value(
            tag,
            name,
            "SafeStyle or a map of style properties",
            other.describe(),
        )),
    }
}

fn url_value<'a>(tag: &str, name: &str, value: &'a AttributeValue) -> Result<Cow<'a, str>> {
    match value {
        AttributeValue::ResourceUrl(url) => Ok(Cow::Borrowed(url.unwrap())),
        AttributeValue::Url(url) => Ok(Cow::Borrowed(url.unwrap())),
        AttributeValue::Text(text) => Ok(Cow::Owned(SafeUrl::sanitize(text).into_string())),
        other => Err(Error::unexpected_value(
            tag,
            name,
            "SafeUrl, TrustedResourceUrl, Const or string",
            other.describe(),
        )),
    }
}
