// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Legacy conversion reporting.
//!
//! The report callback is process-global, so everything runs in a single
//! test in its own binary.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use safevalues::legacy;

#[test]
fn test_report_callback() {
    let seen = Arc::new(Mutex::new(Vec::<&'static str>::new()));
    let recorder = seen.clone();
    legacy::set_report_callback(Arc::new(move |conversion: &'static str| recorder.lock().push(conversion)));

    let html = legacy::safe_html_from_string("<b>legacy</b>");
    assert_eq!(html.unwrap(), "<b>legacy</b>");
    legacy::safe_script_from_string("f()");
    legacy::safe_style_from_string("color:red;");
    legacy::safe_style_sheet_from_string("p{}");
    legacy::safe_url_from_string("/x");
    legacy::trusted_resource_url_from_string("/x.js");

    assert_eq!(
        *seen.lock(),
        vec![
            "safe_html_from_string",
            "safe_script_from_string",
            "safe_style_from_string",
            "safe_style_sheet_from_string",
            "safe_url_from_string",
            "trusted_resource_url_from_string",
        ]
    );

    // Last writer wins
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    legacy::set_report_callback(Arc::new(move |_: &'static str| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    legacy::safe_url_from_string("/y");
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(seen.lock().len(), 6);

    legacy::clear_report_callback();
    legacy::safe_url_from_string("/z");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
