// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! `SafeScript`: script bodies
//!
//! Script text comes either from program literals or from JSON
//! serialization. JSON output has every `<` replaced by `\x3c`, so it cannot
//! close an enclosing `<script>` element or open an HTML comment.

use serde::Serialize;

use super::branded::{Script, SafeValue};
use crate::error::Result;
use crate::string::Const;

/// Script wrapper safe for `<script>` bodies
pub type SafeScript = SafeValue<Script>;

impl SafeValue<Script> {
    /// The empty script
    pub fn empty() -> SafeScript {
        SafeScript::from_trusted("", None)
    }

    /// Wrap a program literal
    pub fn from_constant(script: Const) -> SafeScript {
        if script.unwrap().is_empty() {
            return SafeScript::empty();
        }
        SafeScript::from_trusted(script.unwrap(), None)
    }

    /// Call the literal function expression `code` with JSON arguments.
    ///
    /// Produces `(<code>)(<arg>, <arg>);`.
    pub fn from_constant_and_args(code: Const, args: &[serde_json::Value]) -> Result<SafeScript> {
        let args = args
            .iter()
            .map(stringify)
            .collect::<Result<Vec<_>>>()?
            .join(", ");
        Ok(SafeScript::from_trusted(
            format!("({})({});", code.unwrap(), args),
            None,
        ))
    }

    /// Serialize `value` as a JSON expression
    pub fn from_json<T: Serialize + ?Sized>(value: &T) -> Result<SafeScript> {
        Ok(SafeScript::from_trusted(stringify(value)?, None))
    }
}

impl Default for SafeValue<Script> {
    fn default() -> Self {
        SafeScript::empty()
    }
}

fn stringify<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace('<', "\\x3c"))
}
