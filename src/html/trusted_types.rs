// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Trusted Types host integration
//!
//! A host (for example a wasm binding to the browser's `trustedTypes`
//! factory) can be installed once at startup. On first construction of a
//! `SafeHtml`, `SafeScript` or `TrustedResourceUrl`, a policy is requested
//! from the host and memoized for the rest of the process. Without a host the
//! safe types carry plain strings only.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config;

/// Trusted type produced by a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustedTypeKind {
    /// `TrustedHTML`
    Html,
    /// `TrustedScript`
    Script,
    /// `TrustedScriptURL`
    ScriptUrl,
}

/// Opaque host object whose string form is the wrapped text
pub trait TrustedPlatformValue: fmt::Debug + fmt::Display + Send + Sync {}

/// Shared handle to a host trusted value
pub type PlatformValue = Arc<dyn TrustedPlatformValue>;

/// Policy returned by the host
pub trait TrustedTypesPolicy: Send + Sync {
    /// Wrap markup
    fn create_html(&self, input: &str) -> PlatformValue;
    /// Wrap script text
    fn create_script(&self, input: &str) -> PlatformValue;
    /// Wrap a script URL
    fn create_script_url(&self, input: &str) -> PlatformValue;
}

/// Host capable of creating Trusted Types policies
pub trait TrustedTypesHost: Send + Sync {
    /// Create the named policy, `None` if the host refuses or lacks support
    fn create_policy(&self, name: &str) -> Option<Arc<dyn TrustedTypesPolicy>>;
}

lazy_static! {
    static ref HOST: RwLock<Option<Arc<dyn TrustedTypesHost>>> = RwLock::new(None);
    static ref POLICY: Option<Arc<dyn TrustedTypesPolicy>> = create_policy();
}

static MEMOIZED: AtomicBool = AtomicBool::new(false);

fn create_policy() -> Option<Arc<dyn TrustedTypesPolicy>> {
    MEMOIZED.store(true, Ordering::SeqCst);
    let name = config::current().trusted_types_policy_name;
    let policy = HOST
        .read()
        .as_ref()
        .and_then(|host| host.create_policy(&name));
    tracing::debug!(policy = %name, available = policy.is_some(), "Trusted Types policy memoized");
    policy
}

/// Install the Trusted Types host.
///
/// Must happen before the first safe value is constructed. Returns `false`
/// (and has no effect on the memoized policy) if the policy was already
/// looked up.
pub fn install_host(host: Arc<dyn TrustedTypesHost>) -> bool {
    if MEMOIZED.load(Ordering::SeqCst) {
        tracing::warn!("Trusted Types host installed after the policy was memoized; ignoring");
        return false;
    }
    *HOST.write() = Some(host);
    true
}

/// The memoized policy, if the host provided one
pub fn policy() -> Option<&'static Arc<dyn TrustedTypesPolicy>> {
    POLICY.as_ref()
}

/// Pass `text` through the policy for `kind`
pub(crate) fn adopt(kind: TrustedTypeKind, text: &str) -> Option<PlatformValue> {
    let policy = policy()?;
    Some(match kind {
        TrustedTypeKind::Html => policy.create_html(text),
        TrustedTypeKind::Script => policy.create_script(text),
        TrustedTypeKind::ScriptUrl => policy.create_script_url(text),
    })
}
