use crate::commands::FLAG_IDS;
use anyhow::{Context, anyhow};
use clap::ArgMatches;
use linkrot_core::{OutputFormat, ScanOptions, execute_scan, format_check_result, format_summary};
use std::time::Duration;
use tracing::{Level, info};

/// Build scan options from parsed flags
pub fn scan_options_from_matches(matches: &ArgMatches) -> ScanOptions {
    let defaults = ScanOptions::default();

    ScanOptions {
        url: matches
            .get_one::<String>("url")
            .cloned()
            .unwrap_or(defaults.url),
        delay: matches
            .get_one::<u64>("delay")
            .map(|micros| Duration::from_micros(*micros))
            .unwrap_or(defaults.delay),
        max_depth: matches
            .get_one::<usize>("depth")
            .copied()
            .unwrap_or(defaults.max_depth),
        workers: matches
            .get_one::<usize>("threads")
            .copied()
            .unwrap_or(defaults.workers),
        hide_successes: matches
            .get_one::<bool>("hide-successes")
            .copied()
            .unwrap_or(defaults.hide_successes),
        max_concurrent_checks: matches.get_one::<usize>("max-checks").copied(),
        show_progress: !matches.get_flag("quiet"),
    }
}

pub fn output_format_from_matches(matches: &ArgMatches) -> OutputFormat {
    matches
        .get_one::<String>("format")
        .and_then(|f| OutputFormat::from_str(f))
        .unwrap_or_default()
}

/// `name: value` for every flag, defaults included
pub fn flag_summary(matches: &ArgMatches) -> Vec<String> {
    FLAG_IDS
        .iter()
        .map(|id| {
            let value = matches
                .get_raw(id)
                .map(|values| {
                    values
                        .map(|v| v.to_string_lossy().into_owned())
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .unwrap_or_else(|| "unset".to_string());
            format!("{}: {}", id, value)
        })
        .collect()
}

pub fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    // Results own stdout, logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub async fn handle_scan(matches: &ArgMatches) -> anyhow::Result<()> {
    info!("Starting linkrot");
    for line in flag_summary(matches) {
        println!("{}", line);
    }

    let options = scan_options_from_matches(matches);
    let format = output_format_from_matches(matches);

    let report = execute_scan(options, |result| {
        println!("{}", format_check_result(result, format));
    })
    .await
    .map_err(|e| anyhow!(e))
    .context("Scan failed")?;

    info!("{}", format_summary(&report.summary));
    info!(
        "{} external link references, {} distinct URLs claimed",
        report.external_links_found, report.urls_claimed
    );

    Ok(())
}
