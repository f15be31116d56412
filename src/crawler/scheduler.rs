//! Crawl scheduler: concurrent traversal with at-most-once fetches
//!
//! This module drives the whole traversal:
//! - claiming URLs through the shared registry before any work is spawned
//! - fanning each successful claim out as an independent task
//! - bounding in-flight fetches with a semaphore
//! - detecting global completion when every claim has been finalized and
//!   no task remains in flight
//! - cancellation and an overall run timeout that stop new claims while
//!   already-issued work drains
//!
//! Per-URL lifecycle: unseen -> claimed -> finalized. Pages are fetched and
//! expanded before finalizing; assets are finalized immediately and never
//! fetched.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::Fetcher;
use crate::registry::{Registry, Resource, ResourceKind};
use crate::url::{classify, normalize_link, root_url};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};

/// Delay between retries of a transient fetch failure
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every reachable in-scope URL was discovered and finalized
    Completed,
    /// The overall run timeout elapsed; the snapshot is a partial result
    TimedOut,
    /// The caller cancelled the run; the snapshot is a partial result
    Cancelled,
}

/// Clonable handle for caller-initiated cancellation
///
/// Cancelling stops the scheduler from issuing new claims; work already in
/// flight drains. Workers that observe the flag before fetching finalize
/// their URL with no children instead of fetching.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the run
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// The result of a crawl run
#[derive(Debug)]
pub struct CrawlReport {
    /// How the run terminated
    pub outcome: RunOutcome,

    /// Every finalized resource, keyed by canonical URL
    pub resources: HashMap<String, Resource>,

    /// Claims issued over the run
    pub claimed: usize,

    /// Claims finalized over the run; equals `claimed` at termination
    pub finalized: usize,

    /// Pages whose fetch failed and were finalized with no children
    pub fetch_failures: usize,
}

/// Shared state handed to every worker task
struct CrawlContext<F> {
    fetcher: F,
    registry: Registry,
    limiter: Semaphore,
    base_domain: String,
    retry_count: u32,
    cancel: CancelToken,
    fetch_failures: AtomicUsize,
}

/// Orchestrates the concurrent traversal of one site
///
/// The scheduler owns the registry for the duration of a run and exposes
/// the final graph through the [`CrawlReport`] it returns.
pub struct Scheduler<F: Fetcher> {
    ctx: Arc<CrawlContext<F>>,
    run_timeout: Option<Duration>,
}

impl<F: Fetcher> Scheduler<F> {
    /// Creates a scheduler for one crawl run
    ///
    /// # Arguments
    ///
    /// * `config` - Crawler settings (concurrency bound, timeouts, retries)
    /// * `base_domain` - The sanitized base domain defining crawl scope
    /// * `fetcher` - The fetch collaborator
    pub fn new(config: CrawlerConfig, base_domain: String, fetcher: F) -> Self {
        let run_timeout = match config.run_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        Self {
            ctx: Arc::new(CrawlContext {
                fetcher,
                registry: Registry::new(),
                limiter: Semaphore::new(config.max_concurrent_fetches as usize),
                base_domain,
                retry_count: config.retry_count,
                cancel: CancelToken::new(),
                fetch_failures: AtomicUsize::new(0),
            }),
            run_timeout,
        }
    }

    /// Returns a handle that cancels this run when triggered
    pub fn cancel_token(&self) -> CancelToken {
        self.ctx.cancel.clone()
    }

    /// Runs the crawl to termination and returns the discovered graph
    ///
    /// The run is terminated exactly when every issued claim has been
    /// finalized and no task remains in flight. Fetch failures never abort
    /// the run; they finalize the affected page with no children. On
    /// timeout or cancellation the report's outcome marks the snapshot as
    /// partial.
    pub async fn run(&self) -> CrawlReport {
        let root = root_url(&self.ctx.base_domain);
        tracing::info!("starting crawl of {}", root);
        let started = std::time::Instant::now();

        // The registry is empty, so the seed claim always wins.
        let seeded = self.ctx.registry.try_claim(&root);
        debug_assert!(seeded, "root url was already claimed");

        let mut tasks = JoinSet::new();
        tasks.spawn(expand(Arc::clone(&self.ctx), root));

        let deadline = self.run_timeout.map(|t| Instant::now() + t);
        let mut timed_out = false;

        // Each task returns the child URLs it successfully claimed; every
        // one of those becomes a new task. The run is over when the set
        // drains.
        loop {
            let joined = match deadline {
                Some(at) if !timed_out => match timeout_at(at, tasks.join_next()).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        tracing::warn!(
                            "run timeout of {:?} elapsed, draining in-flight work",
                            self.run_timeout
                        );
                        self.ctx.cancel.cancel();
                        timed_out = true;
                        continue;
                    }
                },
                _ => tasks.join_next().await,
            };

            let Some(result) = joined else {
                break;
            };

            match result {
                Ok(claimed_children) => {
                    for child in claimed_children {
                        tasks.spawn(expand(Arc::clone(&self.ctx), child));
                    }
                }
                Err(e) => {
                    tracing::error!("crawl task failed: {}", e);
                }
            }
        }

        let outcome = if timed_out {
            RunOutcome::TimedOut
        } else if self.ctx.cancel.is_cancelled() {
            RunOutcome::Cancelled
        } else {
            RunOutcome::Completed
        };

        let stats = self.ctx.registry.stats();
        tracing::info!(
            "crawl terminated after {:?}: {} urls discovered ({:?})",
            started.elapsed(),
            stats.finalized,
            outcome
        );

        CrawlReport {
            outcome,
            resources: self.ctx.registry.snapshot(),
            claimed: stats.claimed,
            finalized: stats.finalized,
            fetch_failures: self.ctx.fetch_failures.load(Ordering::Relaxed),
        }
    }
}

/// Fetches and expands one claimed URL
///
/// The caller has already claimed `url`; this function must finalize it on
/// every path. Returns the children it went on to claim, which the run loop
/// turns into new tasks.
async fn expand<F: Fetcher>(ctx: Arc<CrawlContext<F>>, url: String) -> Vec<String> {
    // Draining after cancellation: settle the claim without fetching.
    if ctx.cancel.is_cancelled() {
        ctx.registry.finalize(&url, classify(&url), Vec::new());
        return Vec::new();
    }

    // Assets are terminal: recorded, never fetched.
    if classify(&url) == ResourceKind::Asset {
        tracing::debug!("recording asset {}", url);
        ctx.registry.finalize(&url, ResourceKind::Asset, Vec::new());
        return Vec::new();
    }

    tracing::debug!("expanding page {}", url);

    let body = {
        // The permit bounds in-flight fetches only; registry access below
        // happens after it is released.
        let _permit = match ctx.limiter.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                ctx.registry.finalize(&url, ResourceKind::Page, Vec::new());
                return Vec::new();
            }
        };
        fetch_with_retry(&ctx, &url).await
    };

    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("fetch failed for {}: {}", url, e);
            ctx.fetch_failures.fetch_add(1, Ordering::Relaxed);
            ctx.registry.finalize(&url, ResourceKind::Page, Vec::new());
            return Vec::new();
        }
    };

    // Normalize and deduplicate within this page: the same link appearing
    // twice on one page yields one edge.
    let mut children = Vec::new();
    let mut seen = HashSet::new();
    for raw in extract_links(&body) {
        if let Some(resolved) = normalize_link(&raw, &ctx.base_domain, &url) {
            if seen.insert(resolved.clone()) {
                children.push(resolved);
            }
        }
    }

    ctx.registry
        .finalize(&url, ResourceKind::Page, children.clone());

    // Claim children only while the run is live. A failed claim is normal:
    // another branch owns that URL, and the edge is already recorded above.
    let mut claimed = Vec::new();
    if !ctx.cancel.is_cancelled() {
        for child in children {
            if ctx.registry.try_claim(&child) {
                claimed.push(child);
            }
        }
    }

    claimed
}

/// Fetches a URL, retrying transient failures up to the configured count
async fn fetch_with_retry<F: Fetcher>(ctx: &CrawlContext<F>, url: &str) -> crate::Result<String> {
    let mut attempt = 0u32;
    loop {
        match ctx.fetcher.fetch(url).await {
            Ok(body) => return Ok(body),
            Err(e) if attempt < ctx.retry_count && e.is_transient() => {
                attempt += 1;
                tracing::debug!(
                    "transient fetch failure for {} (attempt {}): {}",
                    url,
                    attempt,
                    e
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(e) => return Err(e),
        }
    }
}
