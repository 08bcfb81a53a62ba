// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Unchecked conversions
//!
//! Wrap strings whose safety has been established by a human review rather
//! than by a builder. Each call takes a literal justification that records
//! why the text satisfies the type's contract; an empty justification is
//! rejected.

use super::{SafeHtml, SafeScript, SafeStyle, SafeStyleSheet, SafeUrl, TrustedResourceUrl};
use crate::error::{Error, Result};
use crate::i18n::Dir;
use crate::string::Const;

fn require_justification(justification: Const) -> Result<()> {
    if justification.is_blank() {
        return Err(Error::MissingJustification);
    }
    Ok(())
}

/// Wrap reviewed markup of direction `dir`
pub fn safe_html_from_string_known_to_satisfy_type_contract(
    justification: Const,
    html: &str,
    dir: Option<Dir>,
) -> Result<SafeHtml> {
    require_justification(justification)?;
    Ok(SafeHtml::from_trusted(html, dir))
}

/// Wrap a reviewed script
pub fn safe_script_from_string_known_to_satisfy_type_contract(
    justification: Const,
    script: &str,
) -> Result<SafeScript> {
    require_justification(justification)?;
    Ok(SafeScript::from_trusted(script, None))
}

/// Wrap reviewed CSS declarations
pub fn safe_style_from_string_known_to_satisfy_type_contract(
    justification: Const,
    style: &str,
) -> Result<SafeStyle> {
    require_justification(justification)?;
    Ok(SafeStyle::from_trusted(style, None))
}

/// Wrap reviewed CSS rules
pub fn safe_style_sheet_from_string_known_to_satisfy_type_contract(
    justification: Const,
    style_sheet: &str,
) -> Result<SafeStyleSheet> {
    require_justification(justification)?;
    Ok(SafeStyleSheet::from_trusted(style_sheet, None))
}

/// Wrap a reviewed navigable URL
pub fn safe_url_from_string_known_to_satisfy_type_contract(
    justification: Const,
    url: &str,
) -> Result<SafeUrl> {
    require_justification(justification)?;
    Ok(SafeUrl::from_trusted(url, None))
}

/// Wrap a reviewed code-loading URL
pub fn trusted_resource_url_from_string_known_to_satisfy_type_contract(
    justification: Const,
    url: &str,
) -> Result<TrustedResourceUrl> {
    require_justification(justification)?;
    Ok(TrustedResourceUrl::from_trusted(url, None))
}
