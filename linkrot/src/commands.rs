use clap::arg;
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

/// Flag ids in the order they are echoed at startup
pub const FLAG_IDS: [&str; 9] = [
    "url",
    "delay",
    "depth",
    "hide-successes",
    "threads",
    "max-checks",
    "format",
    "quiet",
    "debug",
];

/// The seed must parse as a URL but is kept exactly as typed, since local
/// links are appended to it verbatim.
pub fn parse_seed_url(value: &str) -> Result<String, String> {
    Url::parse(value)
        .map(|_| value.to_string())
        .map_err(|e| format!("invalid URL '{}': {}", value, e))
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("linkrot")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkrot")
        .about("Map a site from a seed URL and check every external link it references")
        .after_help(
            "Long flags take two dashes: `linkrot --url http://example.com --depth 3`.\n\
             A single dash is a short flag, so `-url` reads as `-u rl`.",
        )
        .styles(CLAP_STYLING)
        .arg(
            arg!(-u --"url" <URL>)
                .required(false)
                .help("Provide URL to scan")
                .value_parser(parse_seed_url)
                .default_value("http://localhost:1313"),
        )
        .arg(
            arg!(-d --"delay" <MICROSECONDS>)
                .required(false)
                .help("Delay in microseconds before scheduling each newly found page")
                .value_parser(clap::value_parser!(u64))
                .default_value("500"),
        )
        .arg(
            arg!(-D --"depth" <DEPTH>)
                .required(false)
                .help("Max recursion depth for mapping the target site")
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            arg!(--"hide-successes" <BOOL>)
                .required(false)
                .help("Whether to hide successful (200) link checks")
                .value_parser(clap::value_parser!(bool))
                .default_value("true"),
        )
        .arg(
            arg!(-t --"threads" <NUM_WORKERS>)
                .required(false)
                .help("The number of async workers fetching pages during the crawl")
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            arg!(--"max-checks" <NUM>)
                .required(false)
                .help("Limit on concurrent link checks (default: unbounded)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Result format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and progress spinner").required(false))
        .arg(arg!(--"debug" "Enable debug logging").required(false))
}
