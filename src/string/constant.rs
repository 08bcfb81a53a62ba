// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Compile-time-literal strings

use std::fmt;

use serde::{Serialize, Serializer};

use super::typed::TypedString;

/// A string that comes from program source text.
///
/// Only `&'static str` can be wrapped, so a `Const` cannot be assembled from
/// request data at run time. Builders accept a `Const` where they would
/// otherwise refuse arbitrary strings (event handler attributes, resource
/// URL templates, script bodies).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Const(&'static str);

impl Const {
    /// The empty constant
    pub const EMPTY: Const = Const("");

    /// Wrap a literal
    pub const fn from_static(value: &'static str) -> Self {
        Const(value)
    }

    /// Underlying literal
    pub const fn unwrap(&self) -> &'static str {
        self.0
    }

    /// Whether the literal is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Const{{{}}}", self.0)
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl TypedString for Const {
    fn typed_string_value(&self) -> &str {
        self.0
    }
}

impl Serialize for Const {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_roundtrip() {
        const HANDLER: Const = Const::from_static("doThing()");
        assert_eq!(HANDLER.unwrap(), "doThing()");
        assert_eq!(format!("{:?}", HANDLER), "Const{doThing()}");
    }

    #[test]
    fn test_blank() {
        assert!(Const::EMPTY.is_blank());
        assert!(Const::from_static("  \t").is_blank());
        assert!(!Const::from_static("reviewed").is_blank());
    }
}
