// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Capability traits for string-like values

use crate::i18n::Dir;

/// A value that wraps an underlying string.
///
/// Implementing this trait grants no trust: builders unwrap foreign
/// `TypedString`s and escape them like plain text.
pub trait TypedString {
    /// Underlying string
    fn typed_string_value(&self) -> &str;
}

/// A value that knows the directionality of its text.
pub trait DirectionalString {
    /// Direction of the text, `None` if unknown
    fn direction(&self) -> Option<Dir>;
}

impl TypedString for str {
    fn typed_string_value(&self) -> &str {
        self
    }
}

impl TypedString for String {
    fn typed_string_value(&self) -> &str {
        self
    }
}
