//! Bounded, most-recent-first log of retired fingerprints

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::{Fingerprint, RetireReason};
use crate::error::{FingerprintError, Result};

/// Maximum number of retired fingerprints kept per account
pub const MAX_HISTORY: usize = 5;

/// A retired fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub fingerprint: Fingerprint,
    pub reason: RetireReason,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub retired_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Retire `fingerprint` now
    #[must_use]
    pub fn retire(fingerprint: Fingerprint, reason: RetireReason) -> Self {
        Self {
            fingerprint,
            reason,
            retired_at: Utc::now().trunc_subsecs(3),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerprintHistory(Vec<HistoryEntry>);

impl FingerprintHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `entry`, evicting the oldest entry past the cap.
    ///
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.0.insert(0, entry);
        if self.0.len() > MAX_HISTORY {
            self.0.pop()
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Result<&HistoryEntry> {
        self.0.get(index).ok_or(FingerprintError::OutOfRange {
            index,
            len: self.0.len(),
        })
    }

    pub fn remove(&mut self, index: usize) -> Result<HistoryEntry> {
        if index >= self.0.len() {
            return Err(FingerprintError::OutOfRange {
                index,
                len: self.0.len(),
            });
        }
        Ok(self.0.remove(index))
    }

    /// Drop entries beyond the cap (oldest first); returns how many were dropped
    pub fn enforce_cap(&mut self) -> usize {
        let excess = self.0.len().saturating_sub(MAX_HISTORY);
        self.0.truncate(MAX_HISTORY);
        excess
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[HistoryEntry] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a FingerprintHistory {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
