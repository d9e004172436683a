//! Client-side history of past verifications.
//!
//! A bounded, newest-first list persisted as one JSON array. Every
//! mutation rewrites the whole collection (last writer wins; there is no
//! merge strategy, so concurrent writers from separate processes will
//! clobber each other).
//!
//! Corrupt persisted data is treated as an empty history with a logged
//! warning; it never reaches the user as an error.

pub mod storage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    Confidence, EvidenceStats, SourceEvidence, VerificationResult, Verdict,
};

pub use storage::{FileStorage, MemoryStorage, StorageError, StoragePort};

/// Hard cap on stored entries; appending past it evicts the oldest.
pub const HISTORY_CAP: usize = 50;

/// One past verification, read-only once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation-time identity (epoch milliseconds). Removal keys off this,
    /// never off a position in some filtered or sorted view.
    pub id: i64,
    pub claim: String,
    pub verdict: Verdict,
    pub confidence: Confidence,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub evidence: Vec<SourceEvidence>,
    #[serde(default)]
    pub stats: Option<EvidenceStats>,
    #[serde(default)]
    pub credibility_score: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Build an entry from a completed verification.
    pub fn from_result(claim: impl Into<String>, result: &VerificationResult) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            claim: claim.into(),
            verdict: result.verdict,
            confidence: result.confidence,
            explanation: result.explanation.clone(),
            evidence: result.evidence.clone(),
            stats: result.stats.clone(),
            credibility_score: result.credibility_score,
            timestamp: now,
        }
    }
}

/// Sort order for listing history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// By timestamp descending.
    #[default]
    Newest,
    /// By timestamp ascending.
    Oldest,
    /// By confidence descending.
    Confidence,
}

/// Filter and sort for a listing; applied to the returned view only.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Case-insensitive substring match over the claim text.
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl HistoryQuery {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// The persisted history collection.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    storage: Box<dyn StoragePort>,
}

impl HistoryStore {
    /// Open the store, reading whatever is persisted. Unparsable data
    /// degrades to an empty collection.
    pub fn open(storage: Box<dyn StoragePort>) -> Self {
        let entries = match storage.load() {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<HistoryEntry>>(&blob) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("history file is corrupt, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("could not read history, starting empty: {e}");
                Vec::new()
            }
        };

        Self { entries, storage }
    }

    /// Prepend an entry, enforce the cap, persist the whole collection.
    ///
    /// Ids are creation timestamps, so two appends within the same
    /// millisecond would collide; a colliding id is bumped past the
    /// current maximum to keep removal unambiguous.
    pub fn append(&mut self, mut entry: HistoryEntry) -> Result<(), StorageError> {
        if self.entries.iter().any(|e| e.id == entry.id) {
            let max_id = self.entries.iter().map(|e| e.id).max().unwrap_or(entry.id);
            entry.id = max_id + 1;
        }
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAP);
        self.persist()
    }

    /// Snapshot of the collection under `query`. Stored order is never
    /// mutated; sorting is stable for ties.
    pub fn list(&self, query: &HistoryQuery) -> Vec<HistoryEntry> {
        let mut view: Vec<HistoryEntry> = match &query.search {
            Some(term) => {
                let needle = term.to_lowercase();
                self.entries
                    .iter()
                    .filter(|e| e.claim.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => self.entries.clone(),
        };

        match query.sort {
            SortOrder::Newest => view.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortOrder::Oldest => view.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
            SortOrder::Confidence => view.sort_by(|a, b| {
                b.confidence
                    .as_fraction()
                    .partial_cmp(&a.confidence.as_fraction())
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }

        view
    }

    /// Remove the entry with this id, regardless of any active view.
    /// Returns the removed entry, or `None` if the id is unknown.
    pub fn remove(&mut self, id: i64) -> Result<Option<HistoryEntry>, StorageError> {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let removed = self.entries.remove(pos);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Destroy all entries. Irreversible; callers confirm first.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.storage.clear()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.entries).map_err(StorageError::Encode)?;
        self.storage.save(&blob)
    }
}
