// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! String primitives shared by the safe types
//!
//! - `Const`: program-literal strings
//! - `TypedString` / `DirectionalString` capability traits
//! - HTML and URI escaping

mod constant;
pub mod escape;
mod typed;

pub use constant::Const;
pub use typed::{DirectionalString, TypedString};
