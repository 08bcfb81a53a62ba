// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use proptest::prelude::*;
use safevalues::{
    Config, Const, FormatArgs, SafeHtml, SafeStyle, SafeUrl, StyleMap, TrustedResourceUrl,
    UrlParams,
};
use url::Url;

fn style(name: &str, value: &str) -> SafeStyle {
    Config::production().scope(|| SafeStyle::create(&StyleMap::new().set(name, value)).unwrap())
}

fn balanced_quotes(text: &str) -> bool {
    let mut quote = None;
    for c in text.chars() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(open), c) if c == open => quote = None,
            _ => {}
        }
    }
    quote.is_none()
}

fn balanced_brackets(text: &str) -> bool {
    let mut depth = 0;
    for c in text.chars() {
        match c {
            '[' if depth == 0 => depth = 1,
            ']' if depth == 1 => depth = 0,
            '[' | ']' => return false,
            _ => {}
        }
    }
    depth == 0
}

proptest! {
    #[test]
    fn test_sanitize_url_idempotent(input in "\\PC*") {
        let once = SafeUrl::sanitize(&input);
        let twice = SafeUrl::sanitize(once.unwrap());
        prop_assert_eq!(once.unwrap(), twice.unwrap());
    }

    #[test]
    fn test_sanitize_url_keeps_or_replaces(input in "\\PC*") {
        let safe = SafeUrl::sanitize(&input);
        let text = safe.unwrap();
        prop_assert!(
            text == input
                || text == safevalues::html::INNOCUOUS_URL
                || text.to_ascii_lowercase().starts_with("data:")
        );
    }

    #[test]
    fn test_style_concat_is_string_concat(
        a_name in "[a-z][a-z-]{0,10}",
        a_value in "[a-z0-9.%]{1,10}",
        b_name in "[a-z][a-z-]{0,10}",
        b_value in "[a-z0-9.%]{1,10}",
    ) {
        let a = style(&a_name, &a_value);
        let b = style(&b_name, &b_value);
        let both = SafeStyle::concat([&a, &b]);

        prop_assert_eq!(both.unwrap(), format!("{}{}", a.unwrap(), b.unwrap()));
        prop_assert!(both.unwrap().ends_with(';'));
        prop_assert_eq!(both.unwrap().matches('(').count(), both.unwrap().matches(')').count());
    }

    #[test]
    fn test_style_output_stays_in_context(
        name in "[a-z][a-z-]{0,10}",
        value in "[ -~]{0,24}",
    ) {
        let result = Config::production()
            .scope(|| SafeStyle::create(&StyleMap::new().set(name.as_str(), value.as_str())));
        if let Ok(style) = result {
            let text = style.unwrap();
            prop_assert!(text.is_empty() || text.ends_with(';'));
            prop_assert!(!text.contains('{') && !text.contains('}'), "{}", text);
            prop_assert!(balanced_quotes(text), "{}", text);
            prop_assert!(balanced_brackets(text), "{}", text);
        }
    }

    #[test]
    fn test_html_escape_leaves_no_markup(text in "\\PC*") {
        let html = SafeHtml::html_escape(text.as_str());
        prop_assert!(!html.unwrap().contains('<'));
        prop_assert!(!html.unwrap().contains('"'));
    }

    #[test]
    fn test_format_keeps_origin(value in "\\PC*") {
        let mut args = FormatArgs::new();
        args.insert("file".to_string(), value.clone().into());
        let tru = TrustedResourceUrl::format(
            Const::from_static("https://cdn.example.com/static/%{file}.js"),
            &args,
        )
        .unwrap();

        let parsed = Url::parse(tru.unwrap()).unwrap();
        prop_assert_eq!(parsed.scheme(), "https");
        prop_assert_eq!(parsed.host_str(), Some("cdn.example.com"));
        prop_assert!(parsed.path().starts_with("/static/"));
        prop_assert!(parsed.query().is_none());
        prop_assert!(parsed.fragment().is_none());
    }

    #[test]
    fn test_params_keep_origin(key in "\\PC*", value in "\\PC*", hash in "\\PC*") {
        let tru = TrustedResourceUrl::from_constant(Const::from_static("https://example.com/a.js?v=1"));
        let updated = tru.clone_with_params(
            Some(&UrlParams::append([(key, value)])),
            Some(&UrlParams::Replace(hash)),
        );

        let parsed = Url::parse(updated.unwrap()).unwrap();
        prop_assert_eq!(parsed.host_str(), Some("example.com"));
        prop_assert_eq!(parsed.path(), "/a.js");
        prop_assert!(parsed.query().unwrap_or_default().starts_with("v=1&"));
    }
}
