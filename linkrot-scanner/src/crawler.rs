use crate::cache::LinkCache;
use crate::error::{Result, ScanError};
use crate::links::extract_links;
use crate::queue::WorkQueue;
use crate::result::ExternalLink;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// External links discovered by a crawl, in no particular order. Ends once
/// every reachable page within the depth bound has been processed.
pub type LinkStream = UnboundedReceiver<ExternalLink>;

pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_DELAY: Duration = Duration::from_micros(500);
pub const DEFAULT_WORKERS: usize = 10;

#[derive(Debug)]
struct CrawlTask {
    url: String,
    depth: usize,
}

/// State shared by every worker of a single crawl
struct CrawlContext {
    client: Client,
    cache: Arc<LinkCache>,
    base_url: String,
    delay: Duration,
    queue: WorkQueue<CrawlTask>,
    progress_callback: Option<ProgressCallback>,
}

pub struct Crawler {
    client: Client,
    cache: Arc<LinkCache>,
    max_depth: usize,
    delay: Duration,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(client: Client, cache: Arc<LinkCache>) -> Self {
        Self {
            client,
            cache,
            max_depth: DEFAULT_MAX_DEPTH,
            delay: DEFAULT_DELAY,
            workers: DEFAULT_WORKERS,
            progress_callback: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Pause taken before each newly discovered page is scheduled
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Start crawling from `start_url` and return the stream of external
    /// links found on the way.
    ///
    /// Local links are resolved against `start_url` and followed until the
    /// depth budget runs out. Every page is claimed in the shared cache
    /// before it is queued, so no URL is fetched twice. Must be called from
    /// within a tokio runtime.
    pub fn crawl(&self, start_url: &str) -> Result<LinkStream> {
        Url::parse(start_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", start_url, e)))?;

        let (sink, stream) = mpsc::unbounded();

        if self.max_depth == 0 {
            debug!("Depth is 0, nothing to crawl");
            return Ok(stream);
        }
        if self.cache.add_if_absent(start_url) {
            debug!("{} was already claimed, nothing to crawl", start_url);
            return Ok(stream);
        }

        info!(
            "Starting crawl of {} with {} workers (max depth {})",
            start_url, self.workers, self.max_depth
        );

        let context = Arc::new(CrawlContext {
            client: self.client.clone(),
            cache: self.cache.clone(),
            base_url: start_url.to_string(),
            delay: self.delay,
            queue: WorkQueue::new(),
            progress_callback: self.progress_callback.clone(),
        });
        context.queue.push(CrawlTask {
            url: start_url.to_string(),
            depth: self.max_depth,
        });

        let worker_handles: Vec<_> = (0..self.workers)
            .map(|worker_id| {
                let context = context.clone();
                let sink = sink.clone();
                tokio::spawn(Self::run_worker(worker_id, context, sink))
            })
            .collect();

        // Only the workers hold senders now, the stream ends when they do
        drop(sink);

        tokio::spawn(async move {
            for handle in worker_handles {
                if let Err(e) = handle.await {
                    warn!("Crawl worker failed: {}", e);
                }
            }
            info!("Crawl complete. Claimed {} URLs", context.cache.len());
        });

        Ok(stream)
    }

    async fn run_worker(
        worker_id: usize,
        context: Arc<CrawlContext>,
        sink: UnboundedSender<ExternalLink>,
    ) {
        debug!("Worker {} started", worker_id);

        while let Some(task) = context.queue.next().await {
            // Released even if the callback or the visit panics
            let _done = context.queue.completion();

            if let Some(ref callback) = context.progress_callback {
                callback(worker_id, task.url.clone());
            }

            Self::visit(&context, &sink, task).await;
        }

        debug!("Worker {} finished", worker_id);
    }

    async fn visit(context: &CrawlContext, sink: &UnboundedSender<ExternalLink>, task: CrawlTask) {
        let CrawlTask { url, depth } = task;

        let body = match Self::fetch_page(&context.client, &url).await {
            Ok(body) => body,
            Err(e) => {
                debug!("Skipping {}: {}", url, e);
                return;
            }
        };

        let links = extract_links(&body, &context.base_url);
        debug!(
            "[{}] {} local, {} external links",
            url,
            links.local.len(),
            links.external.len()
        );

        for external_url in links.external {
            // A dropped receiver just means nobody wants the results anymore
            let _ = sink.unbounded_send(ExternalLink::new(url.as_str(), external_url));
        }

        let next_depth = depth - 1;
        if next_depth == 0 {
            return;
        }

        for local_url in links.local {
            if context.cache.add_if_absent(&local_url) {
                continue;
            }
            tokio::time::sleep(context.delay).await;
            debug!("[{}] Queuing {} at depth {}", url, local_url, next_depth);
            context.queue.push(CrawlTask {
                url: local_url,
                depth: next_depth,
            });
        }
    }

    async fn fetch_page(client: &Client, url: &str) -> reqwest::Result<String> {
        debug!("Fetching {}", url);
        client.get(url).send().await?.text().await
    }
}
