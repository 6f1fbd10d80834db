use newsdedup_core::AppConfig;

use super::*;

fn config(window: f64) -> AppConfig {
    AppConfig {
        log_level: "info".to_string(),
        title_window_hours: window,
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["newsdedup"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn help_is_handled_by_the_parser() {
    let err = Cli::try_parse_from(["newsdedup", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn parses_dedupe_with_defaults() {
    let cli = Cli::try_parse_from(["newsdedup", "dedupe"]).expect("expected valid cli args");
    let Some(Commands::Dedupe(args)) = cli.command else {
        panic!("expected dedupe command");
    };
    assert!(args.input.is_none());
    assert!(args.output.is_none());
    assert!(args.window_hours.is_none());
    assert!(!args.pretty);
    assert!(!args.report);
    assert_eq!(args.options(&config(48.0)).window_ms(), 48 * 3_600_000);
}

#[test]
fn parses_dedupe_with_all_flags() {
    let cli = Cli::try_parse_from([
        "newsdedup",
        "dedupe",
        "--input",
        "in.json",
        "-o",
        "out.json",
        "--window-hours",
        "6",
        "--pretty",
        "--report",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Dedupe(args)) = cli.command else {
        panic!("expected dedupe command");
    };
    assert_eq!(args.input.as_deref(), Some(std::path::Path::new("in.json")));
    assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.json")));
    assert!(args.pretty);
    assert!(args.report);
    assert_eq!(args.options(&config(48.0)).window_ms(), 6 * 3_600_000);
}

#[test]
fn window_flag_rejects_non_numbers() {
    let result = Cli::try_parse_from(["newsdedup", "dedupe", "--window-hours", "two"]);
    assert!(result.is_err());
}

#[test]
fn config_window_applies_without_flag() {
    let cli = Cli::try_parse_from(["newsdedup", "dedupe"]).expect("expected valid cli args");
    let Some(Commands::Dedupe(args)) = cli.command else {
        panic!("expected dedupe command");
    };
    assert_eq!(args.options(&config(24.0)).window_ms(), 24 * 3_600_000);
}

#[test]
fn parses_canonicalize() {
    let cli = Cli::try_parse_from(["newsdedup", "canonicalize", "https://example.com/a/"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Canonicalize { ref url }) if url == "https://example.com/a/"
    ));
}

#[test]
fn parses_title_key_with_source() {
    let cli = Cli::try_parse_from([
        "newsdedup",
        "title-key",
        "Fed Raises Rates | Reuters",
        "--source",
        "Reuters",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::TitleKey { ref title, source: Some(ref s) })
            if title == "Fed Raises Rates | Reuters" && s == "Reuters"
    ));
}
