// Ballot - the distinct validators that approved a proposal

use crate::identity::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ballot {
    voters: Vec<Address>,
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ballot already carrying one vote
    pub fn with_voter(voter: Address) -> Self {
        Self {
            voters: vec![voter],
        }
    }

    /// Record a vote; returns false if `voter` already voted
    pub fn cast(&mut self, voter: Address) -> bool {
        if self.contains(&voter) {
            return false;
        }
        self.voters.push(voter);
        true
    }

    pub fn contains(&self, voter: &Address) -> bool {
        self.voters.contains(voter)
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn voters(&self) -> &[Address] {
        &self.voters
    }
}
