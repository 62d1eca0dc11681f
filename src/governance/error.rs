// Governance errors
// Every error aborts the call; nothing it staged is written

use crate::governance::thresholds::ThresholdsError;
use crate::identity::{Address, AddressError};
use crate::ledger::{Amount, AmountError};
use crate::registry::RegistryError;
use crate::storage::StoreError;
use thiserror::Error;

/// Broad classes of failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input or amount below a minimum
    Validation,
    /// Caller lacks the right to perform the call
    Authorization,
    /// The call would break a governance invariant
    Invariant,
    /// Storage, registry or encoding failure
    Infrastructure,
}

#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Unidentified operation type: {0}")]
    UnknownMethod(String),

    #[error("Pledge {amount} is below the minimum {minimum}")]
    PledgeTooSmall { amount: Amount, minimum: Amount },

    #[error("Superaddition {amount} is below the minimum {minimum}")]
    SuperadditionTooSmall { amount: Amount, minimum: Amount },

    #[error("{0} is not a current validator")]
    NotValidator(Address),

    #[error("Accused {0} is not a current validator")]
    AccusedNotValidator(Address),

    #[error("{caller} is not the proposer ({proposer}) of this abolish proposal")]
    NotProposer { caller: Address, proposer: Address },

    #[error("{0} has already voted")]
    AlreadyVoted(Address),

    #[error("No abolish proposal against {0}")]
    ProposalNotFound(Address),

    #[error("The number of validators must be > 1, have {0}")]
    InsufficientValidators(usize),

    #[error("Validator {0} has no candidate pool entry")]
    CandidateMissing(Address),

    #[error("{0} holds both a pool entry and a pending pledge")]
    ConflictingRecords(Address),

    #[error("Candidate pool inconsistent: {0}")]
    PoolInconsistent(String),

    #[error("The last candidate cannot withdraw")]
    LastCandidate,

    #[error("Candidate pool is not initialized")]
    NotInitialized,

    #[error("Candidate pool is already initialized")]
    AlreadyInitialized,

    #[error("Validator registry is empty")]
    EmptyValidatorSet,

    #[error("Invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdsError),

    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddress(_)
            | Self::InvalidParams(_)
            | Self::UnknownMethod(_)
            | Self::PledgeTooSmall { .. }
            | Self::SuperadditionTooSmall { .. }
            | Self::AlreadyVoted(_)
            | Self::ProposalNotFound(_)
            | Self::Thresholds(_) => ErrorKind::Validation,
            Self::NotValidator(_) | Self::AccusedNotValidator(_) | Self::NotProposer { .. } => {
                ErrorKind::Authorization
            }
            Self::InsufficientValidators(_)
            | Self::CandidateMissing(_)
            | Self::ConflictingRecords(_)
            | Self::PoolInconsistent(_)
            | Self::LastCandidate
            | Self::AlreadyInitialized
            | Self::EmptyValidatorSet => ErrorKind::Invariant,
            Self::NotInitialized
            | Self::Amount(_)
            | Self::Store(_)
            | Self::Registry(_)
            | Self::Serialization(_) => ErrorKind::Infrastructure,
        }
    }
}
