//! The shared visited registry
//!
//! The registry is the single source of truth for "has this URL already been
//! claimed for fetching". All workers share one instance; every mutation goes
//! through one mutex held only for the duration of the operation, never
//! across a fetch.

use crate::registry::{Resource, ResourceKind};
use std::collections::HashMap;
use std::sync::Mutex;

/// State of a registry slot
#[derive(Debug)]
enum Slot {
    /// Claimed for fetch-and-expand; result not yet recorded
    Claimed,
    /// Fully recorded; immutable from here on
    Finalized(Resource),
}

#[derive(Debug, Default)]
struct RegistryInner {
    slots: HashMap<String, Slot>,
    claimed: usize,
    finalized: usize,
}

/// Claim and finalization counts for termination accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of claims issued over the lifetime of the run
    pub claimed: usize,
    /// Number of claims that have been finalized
    pub finalized: usize,
}

/// Concurrency-safe store of URL -> discovered resource state
///
/// Guarantees at-most-once fetch: `try_claim` is a single critical section,
/// so two racing branches can never both believe they discovered a URL
/// first. Constructed explicitly at the start of a run and read out via
/// [`Registry::snapshot`] after termination; there is no process-wide
/// instance.
#[derive(Debug, Default)]
pub struct Registry {
    inner: Mutex<RegistryInner>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a URL for fetch-and-expand
    ///
    /// If the URL is absent, a placeholder slot is inserted and `true` is
    /// returned; the caller now owns finalizing it. If the URL is already
    /// present (claimed or finalized), returns `false`. A `false` return is
    /// normal concurrent-traversal behavior, not an error.
    pub fn try_claim(&self, url: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.slots.contains_key(url) {
            return false;
        }
        inner.slots.insert(url.to_string(), Slot::Claimed);
        inner.claimed += 1;
        true
    }

    /// Records the final state of a previously claimed URL
    ///
    /// Must be called exactly once per claimed URL. Calling it for a URL
    /// that was never claimed, or a second time, is a programmer defect and
    /// panics.
    pub fn finalize(&self, url: &str, kind: ResourceKind, children: Vec<String>) {
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .slots
            .get_mut(url)
            .unwrap_or_else(|| panic!("finalize called for unclaimed url {}", url));
        if let Slot::Finalized(_) = slot {
            panic!("finalize called twice for {}", url);
        }
        *slot = Slot::Finalized(Resource {
            url: url.to_string(),
            kind,
            children,
        });
        inner.finalized += 1;
    }

    /// Returns the claim/finalize counters
    pub fn stats(&self) -> RegistryStats {
        let inner = self.inner.lock().unwrap();
        RegistryStats {
            claimed: inner.claimed,
            finalized: inner.finalized,
        }
    }

    /// Returns a read-only copy of every finalized resource
    ///
    /// Intended to be taken after the run has terminated, when every claim
    /// has been finalized and there are no concurrent writers.
    pub fn snapshot(&self) -> HashMap<String, Resource> {
        let inner = self.inner.lock().unwrap();
        debug_assert_eq!(
            inner.claimed, inner.finalized,
            "snapshot taken while claims are outstanding"
        );
        inner
            .slots
            .iter()
            .filter_map(|(url, slot)| match slot {
                Slot::Finalized(resource) => Some((url.clone(), resource.clone())),
                Slot::Claimed => None,
            })
            .collect()
    }
}
