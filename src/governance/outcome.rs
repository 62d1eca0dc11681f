// Call outcomes and receipts

use crate::identity::Address;
use crate::ledger::{Amount, Payout};
use serde::Serialize;

/// What a successful call did
///
/// Some outcomes are logical no-ops: the call was valid but had no effect
/// (see [`Outcome::took_effect`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Pledge created or topped up; voting open until `expires_at`
    Pledged { pledge: Amount, expires_at: u64 },
    /// Pool member added stake and now sits at `position`
    ToppedUp { stake: Amount, position: usize },
    /// Vote recorded, quorum not yet reached
    VotePending { votes: usize, quorum: usize },
    /// Applicant entered the candidate pool at `position`
    Promoted { position: usize },
    /// Nothing to vote on: the record passed or expired earlier
    AlreadyResolved,
    /// Applicant's voting window closed; pledge refunded
    Expired,
    /// Candidate pool is at capacity; vote not counted
    PoolFull,
    /// Abolish proposal opened
    Proposed { expires_at: u64 },
    /// An open proposal already exists against the accused
    ProposalActive,
    /// A stale proposal was marked closed
    ProposalClosed,
    /// Proposer withdrew their proposal
    ProposalWithdrawn,
    /// Abolish vote came after the deadline; validator stays
    Retained,
    /// Accused removed and slashed
    Abolished {
        accused: Address,
        refunded: Amount,
        forfeit: Amount,
        share: Amount,
        remainder: Amount,
    },
    /// Pledge or stake returned to the caller
    Withdrawn { amount: Amount },
    /// Caller had nothing staked
    NothingToWithdraw,
}

impl Outcome {
    /// False for outcomes that leave governance in the same logical state
    pub fn took_effect(&self) -> bool {
        !matches!(
            self,
            Self::AlreadyResolved
                | Self::Expired
                | Self::PoolFull
                | Self::ProposalActive
                | Self::ProposalClosed
                | Self::Retained
                | Self::NothingToWithdraw
        )
    }
}

/// Result of a committed call
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub outcome: Outcome,
    /// Transfers the host ledger must apply
    pub payouts: Vec<Payout>,
    /// Whether the validator registry was replaced
    pub validators_synced: bool,
}
