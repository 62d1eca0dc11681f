// Pending records - applicants awaiting admission and abolish proposals
// Stored as JSON under `applicant_<address>` and `abolish_<address>`

use crate::governance::ballot::Ballot;
use crate::identity::Address;
use crate::ledger::Amount;
use serde::{Deserialize, Serialize};

/// Storage keys owned by the contract
pub mod keys {
    use crate::identity::Address;

    pub const CANDIDATES: &str = "validator_candidates";
    pub const APPLICANT_PREFIX: &str = "applicant_";
    pub const ABOLISH_PREFIX: &str = "abolish_";

    pub fn applicant(address: &Address) -> String {
        format!("{}{}", APPLICANT_PREFIX, address)
    }

    pub fn abolish(address: &Address) -> String {
        format!("{}{}", ABOLISH_PREFIX, address)
    }
}

/// A pledge waiting for validator approval
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(rename = "pledge_coin_amount")]
    pub pledge: Amount,
    pub ballot: Ballot,
    #[serde(rename = "voting_expired_time")]
    pub expires_at: u64,
}

impl Applicant {
    pub fn new(pledge: Amount, expires_at: u64) -> Self {
        Self {
            pledge,
            ballot: Ballot::new(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }
}

/// An accusation against a current validator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbolishProposal {
    pub accused: Address,
    pub proposer: Address,
    pub reason: String,
    pub ballot: Ballot,
    #[serde(rename = "voting_expired_time")]
    pub expires_at: u64,
}

impl AbolishProposal {
    /// New proposal; the proposer's own vote is counted
    pub fn new(accused: Address, proposer: Address, reason: String, expires_at: u64) -> Self {
        Self {
            accused,
            ballot: Ballot::with_voter(proposer.clone()),
            proposer,
            reason,
            expires_at,
        }
    }

    /// Votes are refused strictly after the deadline
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    /// A repeated accusation closes the proposal from the deadline on
    pub fn deadline_reached(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}
