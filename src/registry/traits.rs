// Registry Traits
// How the consensus layer exposes its validator list to governance

use crate::governance::CandidateEntry;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Validator registry unavailable: {0}")]
    Unavailable(String),

    #[error("Validator registry data is corrupt: {0}")]
    Corrupt(String),
}

/// The consensus layer's ordered list of active validators
///
/// Governance only ever reads the whole list or replaces the whole list.
pub trait ValidatorRegistry {
    /// Current validators in order
    fn validators(&self) -> Result<Vec<CandidateEntry>, RegistryError>;

    /// Replace the validator list
    fn replace(&self, validators: &[CandidateEntry]) -> Result<(), RegistryError>;
}

impl<T: ValidatorRegistry + ?Sized> ValidatorRegistry for &T {
    fn validators(&self) -> Result<Vec<CandidateEntry>, RegistryError> {
        (**self).validators()
    }

    fn replace(&self, validators: &[CandidateEntry]) -> Result<(), RegistryError> {
        (**self).replace(validators)
    }
}
