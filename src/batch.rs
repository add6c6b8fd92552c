//! The concurrent fetch→extract→aggregate pipeline.
//!
//! [`BatchScraper`] runs one worker per roster target, many at a time, and
//! folds whatever comes back into a [`BatchResult`] whose slots line up with
//! the input order no matter when each worker finishes.
//!
//! # Ordering and isolation
//!
//! Workers complete in arbitrary order; nothing is ever inferred from that
//! order. Every target carries its own roster index, the result vector is
//! allocated at full size before the first worker starts, and each
//! completion writes the single slot at its own index. All completions are
//! funneled through one collection loop on the aggregator's task, so the
//! slot writes need no lock.
//!
//! A worker failure is logged with its URL and cause and leaves its slot
//! empty. It never aborts the batch, and [`BatchScraper::scrape_batch`]
//! itself cannot fail: partial success is the normal outcome.

use crate::extract::{ExtractError, ProfileExtractor};
use crate::fetch::{Fetch, FetchError};
use crate::models::{ProfileRecord, ScrapeTarget};
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// How many profiles are fetched at the same time unless overridden.
pub const DEFAULT_CONCURRENCY: usize = 12;

/// Why a single target produced no record.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page could not be fetched.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    /// The page was fetched but the fields could not be extracted.
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Order-preserving batch outcome: one slot per input target, `None` where
/// the target failed.
///
/// Slot `i` belongs to the target whose roster index is `i`, always. Slots
/// are never reordered and never written more than once; the batch is read
/// only after every worker has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    slots: Vec<Option<ProfileRecord>>,
}

impl BatchResult {
    /// Assemble a result from already-ordered slots, slot `i` belonging to
    /// roster position `i`.
    pub fn from_slots(slots: Vec<Option<ProfileRecord>>) -> Self {
        Self { slots }
    }

    /// Number of slots, equal to the number of input targets regardless of
    /// how many failed.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the batch had no targets at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The record at roster position `index`, if that target succeeded.
    pub fn get(&self, index: usize) -> Option<&ProfileRecord> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// The full slot vector, gaps included, in roster order.
    pub fn slots(&self) -> &[Option<ProfileRecord>] {
        &self.slots
    }

    /// Successful records only, still in roster order.
    pub fn records(&self) -> impl Iterator<Item = &ProfileRecord> {
        self.slots.iter().flatten()
    }

    /// How many targets produced a record.
    pub fn success_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Roster positions of the targets that produced nothing.
    pub fn missing_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| index)
    }
}

/// Fetches and extracts a whole roster of profiles concurrently.
///
/// Generic over [`Fetch`] so tests drive the batch with an in-memory
/// fetcher while production uses [`crate::fetch::HttpFetcher`].
#[derive(Debug)]
pub struct BatchScraper<F> {
    fetcher: F,
    extractor: ProfileExtractor,
    concurrency: usize,
}

impl<F: Fetch> BatchScraper<F> {
    /// Build a scraper with the default concurrency limit.
    pub fn new(fetcher: F, extractor: ProfileExtractor) -> Self {
        Self {
            fetcher,
            extractor,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Cap how many profiles are in flight at once. Values below 1 are
    /// clamped to 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Scrape a single target: fetch, then extract, then tag the record
    /// with the target's roster index.
    ///
    /// One attempt only. The returned error says which stage failed; no
    /// state is shared with other in-flight calls, so this is safe to run
    /// concurrently against distinct targets.
    pub async fn scrape_one(&self, target: &ScrapeTarget) -> Result<ProfileRecord, ScrapeError> {
        let body = self.fetcher.fetch(&target.url).await?;
        let fields = match self.extractor.extract(&body) {
            Ok(fields) => fields,
            Err(e) => {
                debug!(
                    url = %target.url,
                    body_preview = %truncate_for_log(&body, 200),
                    "Page body that defeated extraction"
                );
                return Err(e.into());
            }
        };
        Ok(ProfileRecord {
            name: fields.name,
            followers: fields.followers,
            original_index: target.index,
        })
    }

    /// Scrape every target concurrently and return the order-preserving
    /// batch.
    ///
    /// Targets must carry unique indices in `0..targets.len()`, which is
    /// what the roster loader produces. Per-item failures are logged and
    /// leave their slot empty; this method never fails and returns only
    /// after every launched worker has completed. An empty roster returns
    /// an empty batch without launching anything.
    #[instrument(level = "info", skip_all)]
    pub async fn scrape_batch(&self, targets: &[ScrapeTarget]) -> BatchResult {
        let mut slots: Vec<Option<ProfileRecord>> = Vec::with_capacity(targets.len());
        slots.resize_with(targets.len(), || None);

        let mut completions = stream::iter(targets)
            .map(|target| async move { (target, self.scrape_one(target).await) })
            .buffer_unordered(self.concurrency);

        while let Some((target, outcome)) = completions.next().await {
            match outcome {
                Ok(record) => {
                    debug!(url = %target.url, index = target.index, "Scraped profile");
                    // Each target owns exactly the slot at its index.
                    slots[target.index] = Some(record);
                }
                Err(e) => {
                    error!(url = %target.url, index = target.index, error = %e, "Skipping profile");
                }
            }
        }

        let result = BatchResult { slots };
        info!(
            targets = targets.len(),
            succeeded = result.success_count(),
            "Batch complete"
        );
        result
    }
}
