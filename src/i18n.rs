// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Bidi text directionality

use serde::{Deserialize, Serialize};

/// Directionality of a piece of text.
///
/// Unknown directionality is expressed as `Option::<Dir>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    /// Left-to-right
    Ltr,
    /// Right-to-left
    Rtl,
    /// Usable in either context
    Neutral,
}

impl Dir {
    /// Combine the directions of two adjacent pieces of text.
    ///
    /// Neutral yields to the other side; two different known directions
    /// produce unknown.
    pub fn combine(current: Option<Dir>, next: Option<Dir>) -> Option<Dir> {
        match (current, next) {
            (Some(Dir::Neutral), other) => other,
            (current, Some(Dir::Neutral)) => current,
            (Some(a), Some(b)) if a == b => Some(a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine() {
        assert_eq!(Dir::combine(Some(Dir::Neutral), Some(Dir::Ltr)), Some(Dir::Ltr));
        assert_eq!(Dir::combine(Some(Dir::Rtl), Some(Dir::Neutral)), Some(Dir::Rtl));
        assert_eq!(Dir::combine(Some(Dir::Ltr), Some(Dir::Ltr)), Some(Dir::Ltr));
        assert_eq!(Dir::combine(Some(Dir::Ltr), Some(Dir::Rtl)), None);
        assert_eq!(Dir::combine(None, Some(Dir::Neutral)), None);
        assert_eq!(Dir::combine(Some(Dir::Neutral), None), None);
    }
}
