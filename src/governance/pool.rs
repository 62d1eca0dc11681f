// Candidate Pool - bounded ranked list of staked participants
// The first `validator_set_size` entries are the active validators

use crate::governance::candidate::CandidateEntry;
use crate::identity::Address;
use crate::ledger::{Amount, AmountError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Result of a sorted insertion
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// Entry landed at this position
    Inserted { position: usize },
    /// Pool already at capacity; nothing changed
    PoolFull,
}

/// Candidates sorted by descending stake, then ascending address
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidatePool {
    entries: Vec<CandidateEntry>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from unordered entries
    pub fn from_entries(mut entries: Vec<CandidateEntry>) -> Self {
        entries.sort_by(CandidateEntry::rank_cmp);
        Self { entries }
    }

    pub fn entries(&self) -> &[CandidateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&CandidateEntry> {
        self.entries.get(position)
    }

    /// Position of `address`, by linear scan
    pub fn position(&self, address: &Address) -> Option<usize> {
        self.entries.iter().position(|e| &e.address == address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.position(address).is_some()
    }

    /// The first `n` entries (fewer if the pool is shorter)
    pub fn top(&self, n: usize) -> &[CandidateEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Insert keeping the pool order, unless the pool already holds `capacity` entries
    pub fn insert_sorted(&mut self, address: Address, stake: Amount, capacity: usize) -> Insertion {
        if self.entries.len() >= capacity {
            return Insertion::PoolFull;
        }

        let entry = CandidateEntry::new(address, stake);
        let position = self
            .entries
            .partition_point(|e| e.rank_cmp(&entry) == Ordering::Less);
        self.entries.insert(position, entry);
        Insertion::Inserted { position }
    }

    pub fn remove(&mut self, position: usize) -> Option<CandidateEntry> {
        if position < self.entries.len() {
            Some(self.entries.remove(position))
        } else {
            None
        }
    }

    /// Add `amount` to the stake at `position` without re-sorting
    ///
    /// Callers must only credit in a way that keeps the order intact.
    pub fn credit(&mut self, position: usize, amount: Amount) -> Result<(), AmountError> {
        if let Some(entry) = self.entries.get_mut(position) {
            entry.stake = entry.stake.checked_add(amount)?;
        }
        Ok(())
    }

    /// Sum of all stakes
    pub fn total_stake(&self) -> Result<Amount, AmountError> {
        self.entries
            .iter()
            .try_fold(Amount::ZERO, |acc, e| acc.checked_add(e.stake))
    }

    /// Check the ordering invariant
    pub fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| w[0].rank_cmp(&w[1]) == Ordering::Less)
    }
}
