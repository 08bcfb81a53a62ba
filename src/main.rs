// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! safevalues CLI
//!
//! Shows what the sanitizers and builders produce for a given input.

use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context};

use safevalues::{config, Config, SafeHtml, SafeScript, SafeStyle, SafeStyleSheet, SafeUrl, StyleMap};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("safevalues=info".parse().unwrap()),
        )
        .init();

    // Report substitutions through the log instead of panicking
    config::install(Config::production());

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "sanitize-url" => {
            if args.len() < 3 {
                eprintln!("Usage: safevalues sanitize-url <url>");
                return ExitCode::from(1);
            }
            sanitize_url(&args[2])
        }
        "escape" => {
            if args.len() < 3 {
                eprintln!("Usage: safevalues escape <text>");
                return ExitCode::from(1);
            }
            escape(&args[2])
        }
        "style" => style(&args[2..]),
        "rule" => {
            if args.len() < 3 {
                eprintln!("Usage: safevalues rule <selector> [<property> <value>]...");
                return ExitCode::from(1);
            }
            rule(&args[2], &args[3..])
        }
        "script-json" => {
            if args.len() < 3 {
                eprintln!("Usage: safevalues script-json <json>");
                return ExitCode::from(1);
            }
            script_json(&args[2])
        }
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("safevalues {}", safevalues::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r##"safevalues - Injection-safe string types

USAGE:
    safevalues <COMMAND> [ARGS]

COMMANDS:
    sanitize-url <url>                          Sanitize a URL for navigation sinks
    escape <text>                               HTML-escape text, keeping line breaks
    style [<property> <value>]...               Build CSS declarations
    rule <selector> [<property> <value>]...     Build a CSS rule
    script-json <json>                          Embed JSON in a script body
    help                                        Show this help message
    version                                     Show version information

EXAMPLES:
    safevalues sanitize-url "javascript:alert(1)"
    safevalues escape "<b>bold</b>"
    safevalues style width 1em background "url(/a.png)"
    safevalues rule "#main > p" color red
    safevalues script-json '{{"user": "</script>"}}'

Set RUST_LOG=safevalues=debug to see every substitution.
"##
    );
}

fn sanitize_url(url: &str) -> anyhow::Result<String> {
    let safe = SafeUrl::sanitize(url);
    if safe.unwrap() != url {
        tracing::info!(input = url, "URL replaced by innocuous value");
    }
    Ok(safe.into_string())
}

fn escape(text: &str) -> anyhow::Result<String> {
    Ok(SafeHtml::html_escape_preserving_newlines(text).into_string())
}

fn style_map(pairs: &[String]) -> anyhow::Result<StyleMap> {
    if pairs.len() % 2 != 0 {
        bail!("expected <property> <value> pairs, got {} arguments", pairs.len());
    }
    Ok(pairs
        .chunks(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect())
}

fn style(pairs: &[String]) -> anyhow::Result<String> {
    let map = style_map(pairs)?;
    let style = SafeStyle::create(&map).context("invalid style")?;
    Ok(style.into_string())
}

fn rule(selector: &str, pairs: &[String]) -> anyhow::Result<String> {
    let map = style_map(pairs)?;
    let sheet = SafeStyleSheet::create_rule(selector, map).context("invalid rule")?;
    Ok(sheet.into_string())
}

fn script_json(json: &str) -> anyhow::Result<String> {
    let value: serde_json::Value = serde_json::from_str(json).context("input is not valid JSON")?;
    let script = SafeScript::from_json(&value)?;
    Ok(script.into_string())
}
