//! Report output for completed crawl runs
//!
//! Prints the discovered link graph, one line per URL with its child
//! count, followed by a summary.

use crate::crawler::{CrawlReport, RunOutcome};
use crate::registry::{Resource, ResourceKind};
use std::collections::HashMap;

/// Aggregate numbers derived from a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    /// Total resources discovered
    pub total: usize,

    /// Resources classified as pages
    pub pages: usize,

    /// Resources classified as assets
    pub assets: usize,

    /// Total edges in the link graph
    pub edges: usize,
}

impl CrawlStats {
    /// Computes stats from a registry snapshot
    pub fn from_snapshot(resources: &HashMap<String, Resource>) -> Self {
        let mut pages = 0;
        let mut assets = 0;
        let mut edges = 0;

        for resource in resources.values() {
            match resource.kind {
                ResourceKind::Page => pages += 1,
                ResourceKind::Asset => assets += 1,
            }
            edges += resource.children.len();
        }

        Self {
            total: resources.len(),
            pages,
            assets,
            edges,
        }
    }
}

/// Prints the full crawl report to stdout
pub fn print_report(report: &CrawlReport) {
    let mut urls: Vec<&String> = report.resources.keys().collect();
    urls.sort();

    for url in urls {
        let resource = &report.resources[url];
        println!("{} has {} children", url, resource.children.len());
    }

    let stats = CrawlStats::from_snapshot(&report.resources);

    println!();
    println!(
        "{} resources discovered ({} pages, {} assets), {} edges",
        stats.total, stats.pages, stats.assets, stats.edges
    );
    if report.fetch_failures > 0 {
        println!("{} pages failed to fetch", report.fetch_failures);
    }

    match report.outcome {
        RunOutcome::Completed => {}
        RunOutcome::TimedOut => {
            println!("run timed out before completion; results are partial");
        }
        RunOutcome::Cancelled => {
            println!("run was cancelled; results are partial");
        }
    }
}
