// Candidate entries - (address, stake) pairs shared by the pool and the registry

use crate::identity::Address;
use crate::ledger::Amount;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A staked participant; serialized as `[address, stake]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Address, Amount)", into = "(Address, Amount)")]
pub struct CandidateEntry {
    pub address: Address,
    pub stake: Amount,
}

impl CandidateEntry {
    pub fn new(address: Address, stake: Amount) -> Self {
        Self { address, stake }
    }

    /// Pool order: higher stake first, ties broken by ascending address
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .stake
            .cmp(&self.stake)
            .then_with(|| self.address.cmp(&other.address))
    }
}

impl From<(Address, Amount)> for CandidateEntry {
    fn from((address, stake): (Address, Amount)) -> Self {
        Self { address, stake }
    }
}

impl From<CandidateEntry> for (Address, Amount) {
    fn from(entry: CandidateEntry) -> Self {
        (entry.address, entry.stake)
    }
}
