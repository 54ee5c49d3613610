use crate::cache::LinkCache;
use crate::result::{CheckResult, ExternalLink};
use futures::channel::mpsc::{self, UnboundedReceiver};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Check results in completion order. Ends after the last check finished.
pub type ResultStream = UnboundedReceiver<CheckResult>;

/// A started batch of link checks
pub struct CheckRun {
    /// Number of checks actually issued, hidden successes included
    pub checked: usize,
    pub results: ResultStream,
}

pub struct Checker {
    client: Client,
    cache: Arc<LinkCache>,
    hide_successes: bool,
    max_concurrent: Option<usize>,
}

impl Checker {
    pub fn new(client: Client, cache: Arc<LinkCache>) -> Self {
        Self {
            client,
            cache,
            hide_successes: true,
            max_concurrent: None,
        }
    }

    /// Drop plain `200` results instead of reporting them
    pub fn with_hide_successes(mut self, hide_successes: bool) -> Self {
        self.hide_successes = hide_successes;
        self
    }

    /// Cap on requests in flight at once. `None` issues every check at once.
    pub fn with_max_concurrent(mut self, max_concurrent: Option<usize>) -> Self {
        self.max_concurrent = max_concurrent.map(|n| n.max(1));
        self
    }

    /// Spawn one check per external URL that is not yet claimed in the cache.
    ///
    /// Links are claimed in input order, so when the same URL shows up on
    /// several pages the first record is the one that gets checked. Must be
    /// called from within a tokio runtime.
    pub fn check(&self, links: Vec<ExternalLink>) -> CheckRun {
        let (sink, results) = mpsc::unbounded();
        let semaphore = self.max_concurrent.map(|n| Arc::new(Semaphore::new(n)));

        let mut checked = 0;
        for link in links {
            if self.cache.add_if_absent(&link.external_url) {
                debug!("Skipping already claimed {}", link.external_url);
                continue;
            }
            checked += 1;

            let client = self.client.clone();
            let sink = sink.clone();
            let semaphore = semaphore.clone();
            let hide_successes = self.hide_successes;
            tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => match semaphore.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(_) => return,
                    },
                    None => None,
                };

                if let Some(result) = check_link(&client, &link, hide_successes).await {
                    let _ = sink.unbounded_send(result);
                }
            });
        }

        info!("Checking {} external links", checked);
        CheckRun { checked, results }
    }
}

/// GET one link. Returns `None` for a 200 when successes are hidden.
async fn check_link(client: &Client, link: &ExternalLink, hide_successes: bool) -> Option<CheckResult> {
    debug!("Checking link: {}", link.external_url);

    match client.get(&link.external_url).send().await {
        Ok(response) => {
            let status_code = response.status().as_u16();
            if status_code == 200 && hide_successes {
                return None;
            }
            Some(CheckResult::status(link, status_code))
        }
        Err(e) => Some(CheckResult::error(link, e.to_string())),
    }
}
