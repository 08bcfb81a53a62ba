// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Branded safe values
//!
//! All six safe types are instantiations of [`SafeValue`], generic over a
//! zero-sized kind marker. A value can only be built through
//! [`SafeValue::from_trusted`], which needs a [`Brand`]; `Brand` has a
//! private field and is only ever created in this module, so no other code
//! (in or out of the crate) can assemble a `SafeValue` from parts.
//!
//! [`SafeValue::unwrap_any`] covers the dynamic surface: it takes an
//! arbitrary `&dyn Any` and only yields text when the concrete type is
//! exactly the expected safe type.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Serialize, Serializer};

use super::trusted_types::{self, PlatformValue, TrustedTypeKind};
use crate::asserts;
use crate::i18n::Dir;
use crate::string::TypedString;

mod sealed {
    pub trait Sealed {}
}

/// Kind of safe value: names the sink and the Trusted Types mapping
pub trait SafeKind: sealed::Sealed + 'static {
    /// Type name used in diagnostics
    const NAME: &'static str;
    /// Innocuous text returned when a forged value is unwrapped
    const TYPE_ERROR: &'static str;
    /// Trusted type the host policy should produce, if any
    const TRUSTED_TYPE: Option<TrustedTypeKind>;
}

macro_rules! safe_kind {
    ($(#[$doc:meta])* $kind:ident, $name:literal, $trusted:expr) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub enum $kind {}

        impl sealed::Sealed for $kind {}

        impl SafeKind for $kind {
            const NAME: &'static str = $name;
            const TYPE_ERROR: &'static str = concat!("type_error:", $name);
            const TRUSTED_TYPE: Option<TrustedTypeKind> = $trusted;
        }
    };
}

safe_kind!(
    /// HTML markup
    Html, "SafeHtml", Some(TrustedTypeKind::Html)
);
safe_kind!(
    /// Script body
    Script, "SafeScript", Some(TrustedTypeKind::Script)
);
safe_kind!(
    /// URL that loads code
    ResourceUrl, "TrustedResourceUrl", Some(TrustedTypeKind::ScriptUrl)
);
safe_kind!(
    /// Navigable URL
    Url, "SafeUrl", None
);
safe_kind!(
    /// CSS declarations
    Style, "SafeStyle", None
);
safe_kind!(
    /// CSS rules
    StyleSheet, "SafeStyleSheet", None
);

/// Construction token; only this module can create one
#[derive(Clone, Copy)]
struct Brand(());

/// Immutable string certified safe for the sink of `K`
pub struct SafeValue<K: SafeKind> {
    text: String,
    platform: Option<PlatformValue>,
    dir: Option<Dir>,
    _brand: Brand,
    _kind: PhantomData<fn() -> K>,
}

impl<K: SafeKind> SafeValue<K> {
    /// Wrap text already known to satisfy the contract of `K`.
    ///
    /// Every factory in the crate funnels through here.
    pub(crate) fn from_trusted(text: impl Into<String>, dir: Option<Dir>) -> Self {
        let text = text.into();
        let platform = K::TRUSTED_TYPE.and_then(|kind| trusted_types::adopt(kind, &text));
        Self {
            text,
            platform,
            dir,
            _brand: Brand(()),
            _kind: PhantomData,
        }
    }

    /// Underlying text
    pub fn unwrap(&self) -> &str {
        &self.text
    }

    /// Underlying text, by value
    pub fn into_string(self) -> String {
        self.text
    }

    /// Whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Host Trusted Types object for this value, if a policy is installed
    pub fn platform_value(&self) -> Option<&PlatformValue> {
        self.platform.as_ref()
    }

    pub(crate) fn dir(&self) -> Option<Dir> {
        self.dir
    }

    pub(crate) fn with_dir(mut self, dir: Option<Dir>) -> Self {
        self.dir = dir;
        self
    }

    /// Unwrap a value of unknown type.
    ///
    /// Yields the text only if `value` is exactly a `SafeValue<K>`. Anything
    /// else is treated as a forgery: an assertion failure is raised and the
    /// innocuous `type_error:<Type>` string is returned.
    pub fn unwrap_any(value: &dyn Any) -> Cow<'_, str> {
        match value.downcast_ref::<Self>() {
            Some(safe) => Cow::Borrowed(safe.unwrap()),
            None => {
                asserts::fail(format_args!("expected object of type {}", K::NAME));
                Cow::Borrowed(K::TYPE_ERROR)
            }
        }
    }
}

impl<K: SafeKind> Clone for SafeValue<K> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            platform: self.platform.clone(),
            dir: self.dir,
            _brand: self._brand,
            _kind: PhantomData,
        }
    }
}

impl<K: SafeKind> PartialEq for SafeValue<K> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl<K: SafeKind> Eq for SafeValue<K> {}

impl<K: SafeKind> Hash for SafeValue<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl<K: SafeKind> fmt::Debug for SafeValue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", K::NAME, self.text)
    }
}

impl<K: SafeKind> fmt::Display for SafeValue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<K: SafeKind> TypedString for SafeValue<K> {
    fn typed_string_value(&self) -> &str {
        &self.text
    }
}

impl<K: SafeKind> Serialize for SafeValue<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
