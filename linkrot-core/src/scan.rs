use crate::report::CheckSummary;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use linkrot_scanner::{CheckResult, Checker, Crawler, ExternalLink, LinkCache, build_client};
use reqwest::Client;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::info;

/// Options for configuring a scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub url: String,
    pub delay: Duration,
    pub max_depth: usize,
    pub workers: usize,
    pub hide_successes: bool,
    pub max_concurrent_checks: Option<usize>,
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            url: "http://localhost:1313".to_string(),
            delay: linkrot_scanner::crawler::DEFAULT_DELAY,
            max_depth: linkrot_scanner::crawler::DEFAULT_MAX_DEPTH,
            workers: linkrot_scanner::crawler::DEFAULT_WORKERS,
            hide_successes: true,
            max_concurrent_checks: None,
            show_progress: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    /// External link records collected by the crawl, duplicates included
    pub external_links_found: usize,
    /// Distinct URLs claimed in the cache over the whole run
    pub urls_claimed: usize,
    pub summary: CheckSummary,
}

fn spinner(show: bool, message: &'static str) -> Option<ProgressBar> {
    if !show {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Some(pb)
}

/// Crawl the site and drain the link stream into a list.
///
/// Returns only once every crawl worker has finished, which is what keeps
/// the check phase from starting early.
pub async fn collect_external_links(
    options: &ScanOptions,
    client: &Client,
    cache: Arc<LinkCache>,
) -> Result<Vec<ExternalLink>, String> {
    let progress_bar = spinner(options.show_progress, "Mapping site...").map(Arc::new);
    let pages = Arc::new(AtomicUsize::new(0));

    let mut crawler = Crawler::new(client.clone(), cache)
        .with_max_depth(options.max_depth)
        .with_delay(options.delay)
        .with_workers(options.workers);

    if let Some(ref pb) = progress_bar {
        let pb = pb.clone();
        let pages = pages.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |_worker_id: usize, url: String| {
            let count = pages.fetch_add(1, Ordering::Relaxed) + 1;
            pb.set_message(format!("Mapping site... {} pages, now {}", count, url));
        }));
    }

    let mut stream = crawler
        .crawl(&options.url)
        .map_err(|e| format!("Failed to start crawl: {}", e))?;

    let mut links = Vec::new();
    while let Some(link) = stream.next().await {
        links.push(link);
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }
    info!("Found {} external link references", links.len());

    Ok(links)
}

/// Verify the collected links, handing each result to `on_result` as soon as
/// it arrives. The elapsed time covers issuing the checks until the last one
/// is done.
pub async fn check_external_links<F>(
    links: Vec<ExternalLink>,
    options: &ScanOptions,
    client: &Client,
    cache: Arc<LinkCache>,
    mut on_result: F,
) -> CheckSummary
where
    F: FnMut(&CheckResult),
{
    let start = Instant::now();

    let run = Checker::new(client.clone(), cache)
        .with_hide_successes(options.hide_successes)
        .with_max_concurrent(options.max_concurrent_checks)
        .check(links);

    let checked = run.checked;
    let mut results = run.results;
    while let Some(result) = results.next().await {
        on_result(&result);
    }

    CheckSummary {
        checked,
        elapsed: start.elapsed(),
    }
}

/// Run a full scan: crawl, then check, sharing one cache for both phases.
pub async fn execute_scan<F>(options: ScanOptions, on_result: F) -> Result<ScanReport, String>
where
    F: FnMut(&CheckResult),
{
    let client = build_client().map_err(|e| format!("Failed to create HTTP client: {}", e))?;
    let cache = Arc::new(LinkCache::new());

    let links = collect_external_links(&options, &client, cache.clone()).await?;
    let external_links_found = links.len();

    let summary = check_external_links(links, &options, &client, cache.clone(), on_result).await;

    Ok(ScanReport {
        external_links_found,
        urls_claimed: cache.len(),
        summary,
    })
}
