use linkrot::commands::{command_argument_builder, parse_seed_url};
use linkrot::handlers::*;
use linkrot::OutputFormat;
use std::time::Duration;

fn parse(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["linkrot"];
    argv.extend_from_slice(args);
    command_argument_builder()
        .try_get_matches_from(argv)
        .unwrap()
}

#[test]
fn test_defaults() {
    let matches = parse(&[]);
    let options = scan_options_from_matches(&matches);

    assert_eq!(options.url, "http://localhost:1313");
    assert_eq!(options.delay, Duration::from_micros(500));
    assert_eq!(options.max_depth, 10);
    assert_eq!(options.workers, 10);
    assert!(options.hide_successes);
    assert_eq!(options.max_concurrent_checks, None);
    assert!(options.show_progress);
    assert_eq!(output_format_from_matches(&matches), OutputFormat::Text);
}

#[test]
fn test_all_flags() {
    let matches = parse(&[
        "--url",
        "https://example.com",
        "--delay",
        "0",
        "--depth",
        "3",
        "--hide-successes",
        "false",
        "--threads",
        "4",
        "--max-checks",
        "16",
        "--format",
        "json",
        "--quiet",
    ]);
    let options = scan_options_from_matches(&matches);

    assert_eq!(options.url, "https://example.com");
    assert_eq!(options.delay, Duration::ZERO);
    assert_eq!(options.max_depth, 3);
    assert_eq!(options.workers, 4);
    assert!(!options.hide_successes);
    assert_eq!(options.max_concurrent_checks, Some(16));
    assert!(!options.show_progress);
    assert_eq!(output_format_from_matches(&matches), OutputFormat::Json);
}

#[test]
fn test_short_flags() {
    let matches = parse(&["-u", "http://x", "-d", "100", "-D", "2", "-t", "1", "-f", "text", "-q"]);
    let options = scan_options_from_matches(&matches);

    assert_eq!(options.url, "http://x");
    assert_eq!(options.delay, Duration::from_micros(100));
    assert_eq!(options.max_depth, 2);
    assert_eq!(options.workers, 1);
    assert!(!options.show_progress);
}

#[test]
fn test_seed_url_kept_verbatim() {
    // Url would normalize this to "http://example.com/"
    let matches = parse(&["--url", "http://example.com"]);
    assert_eq!(scan_options_from_matches(&matches).url, "http://example.com");
}

#[test]
fn test_invalid_url_is_a_parse_error() {
    let result = command_argument_builder().try_get_matches_from(["linkrot", "--url", "not a url"]);
    assert!(result.is_err());
}

#[test]
fn test_negative_depth_is_a_parse_error() {
    let result = command_argument_builder().try_get_matches_from(["linkrot", "--depth=-1"]);
    assert!(result.is_err());
}

#[test]
fn test_unknown_format_is_a_parse_error() {
    let result = command_argument_builder().try_get_matches_from(["linkrot", "--format", "csv"]);
    assert!(result.is_err());
}

#[test]
fn test_hide_successes_requires_bool() {
    let result =
        command_argument_builder().try_get_matches_from(["linkrot", "--hide-successes", "maybe"]);
    assert!(result.is_err());
}

#[test]
fn test_help_explains_double_dash_flags() {
    let help = command_argument_builder().render_long_help().to_string();
    assert!(help.contains("--url http://example.com"));
    assert!(help.contains("`-url` reads as `-u rl`"));
}

#[test]
fn test_single_dash_long_name_is_read_as_short_flag() {
    let result = command_argument_builder().try_get_matches_from(["linkrot", "-url", "http://x"]);
    // `-u` takes "rl" as its value, which is not a URL
    assert!(result.is_err());
}

#[test]
fn test_parse_seed_url() {
    assert_eq!(
        parse_seed_url("http://localhost:1313"),
        Ok("http://localhost:1313".to_string())
    );
    assert!(parse_seed_url("localhost").is_err());
}

#[test]
fn test_flag_summary_defaults() {
    let matches = parse(&[]);
    assert_eq!(
        flag_summary(&matches),
        vec![
            "url: http://localhost:1313",
            "delay: 500",
            "depth: 10",
            "hide-successes: true",
            "threads: 10",
            "max-checks: unset",
            "format: text",
            "quiet: false",
            "debug: false",
        ]
    );
}

#[test]
fn test_flag_summary_reflects_overrides() {
    let matches = parse(&["--depth", "2", "--max-checks", "8", "--debug"]);
    let summary = flag_summary(&matches);

    assert!(summary.contains(&"depth: 2".to_string()));
    assert!(summary.contains(&"max-checks: 8".to_string()));
    assert!(summary.contains(&"debug: true".to_string()));
}
