// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for safevalues
//!
//! Every variant here is a programmer error: an invalid tag, attribute or
//! property *name*, a malformed constant template, a selector with syntax the
//! allow-list does not cover. Untrusted *content* never produces an `Error`;
//! it is replaced by an innocuous value instead (see `asserts`).

use thiserror::Error;

/// Result type alias for safevalues operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for safevalues
#[derive(Error, Debug)]
pub enum Error {
    /// Tag name contains characters outside `[a-zA-Z0-9-]`
    #[error("Invalid tag name <{0}>")]
    InvalidTagName(String),

    /// Tag is not allowed in the generic element builder
    #[error("Tag name <{0}> is not allowed for SafeHtml")]
    TagNotAllowed(String),

    /// Attribute name contains characters outside `[a-zA-Z0-9-]`
    #[error("Invalid attribute name \"{0}\"")]
    InvalidAttributeName(String),

    /// Attribute only accepts a compile-time constant
    #[error("Attribute \"{name}\" requires a Const value, \"{value}\" given")]
    ConstRequired { name: String, value: String },

    /// Attribute value has a type the attribute does not accept
    #[error("Attribute \"{name}\" on tag <{tag}> accepts {expected}, got {got}")]
    UnexpectedAttributeValue {
        tag: String,
        name: String,
        expected: &'static str,
        got: String,
    },

    /// `style` attribute support is compiled out
    #[error("Attribute \"style\" not supported")]
    StyleAttributeNotSupported,

    /// Caller tried to override a security-relevant fixed attribute
    #[error("Cannot override \"{name}\" attribute, got \"{given}\"")]
    AttributeOverride { name: String, given: String },

    /// Caller tried to set an attribute a dedicated builder forbids
    #[error("Cannot set \"{0}\" attribute")]
    ForbiddenAttribute(String),

    /// Void element was given content
    #[error("Void tag <{0}> does not allow content")]
    VoidTagContent(String),

    /// Host does not support sandboxed iframes
    #[error("The host does not support sandboxed iframes")]
    SandboxUnsupported,

    /// CSS property name contains characters outside `[-_a-zA-Z0-9]`
    #[error("Name allows only [-_a-zA-Z0-9], got: {0}")]
    InvalidPropertyName(String),

    /// CSS property value would change the declaration context
    #[error("Value does not allow [{{;}}], got: {0}")]
    InvalidPropertyValue(String),

    /// CSS selector is outside the allowed syntax
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Resource URL template does not start with an allowed base
    #[error("Invalid TrustedResourceUrl format: {0}")]
    InvalidResourceUrlFormat(String),

    /// Resource URL template references a marker with no argument
    #[error("Found marker \"{marker}\" in format string \"{format}\", but no argument was given for it")]
    MissingFormatArgument { marker: String, format: String },

    /// Program literal does not have the shape its type requires
    #[error("Invalid {kind} constant: {reason}")]
    InvalidConstant { kind: &'static str, reason: String },

    /// Unchecked conversion called without a justification
    #[error("Unchecked conversion requires a non-empty justification")]
    MissingJustification,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a selector error
    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Create an attribute type error
    pub fn unexpected_value(
        tag: impl Into<String>,
        name: impl Into<String>,
        expected: &'static str,
        got: impl Into<String>,
    ) -> Self {
        Error::UnexpectedAttributeValue {
            tag: tag.into(),
            name: name.into(),
            expected,
            got: got.into(),
        }
    }

    /// Check if this error was raised while validating a name
    pub fn is_invalid_name(&self) -> bool {
        matches!(
            self,
            Error::InvalidTagName(_) | Error::InvalidAttributeName(_) | Error::InvalidPropertyName(_)
        )
    }

    /// Check if this error concerns an attribute of an element builder
    pub fn is_attribute_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAttributeName(_)
                | Error::ConstRequired { .. }
                | Error::UnexpectedAttributeValue { .. }
                | Error::StyleAttributeNotSupported
                | Error::AttributeOverride { .. }
                | Error::ForbiddenAttribute(_)
        )
    }

    /// Get the offending attribute name if available
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Error::InvalidAttributeName(name) => Some(name),
            Error::ConstRequired { name, .. } => Some(name),
            Error::UnexpectedAttributeValue { name, .. } => Some(name),
            Error::AttributeOverride { name, .. } => Some(name),
            Error::ForbiddenAttribute(name) => Some(name),
            Error::StyleAttributeNotSupported => Some("style"),
            _ => None,
        }
    }
}
