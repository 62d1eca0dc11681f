// MemoryRegistry - In-process validator registry

use crate::governance::CandidateEntry;
use crate::registry::traits::{RegistryError, ValidatorRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    validators: Mutex<Vec<CandidateEntry>>,
    replacements: AtomicUsize,
}

impl MemoryRegistry {
    pub fn new(validators: Vec<CandidateEntry>) -> Self {
        Self {
            validators: Mutex::new(validators),
            replacements: AtomicUsize::new(0),
        }
    }

    /// Number of times the list has been replaced
    pub fn replacement_count(&self) -> usize {
        self.replacements.load(Ordering::SeqCst)
    }
}

impl ValidatorRegistry for MemoryRegistry {
    fn validators(&self) -> Result<Vec<CandidateEntry>, RegistryError> {
        self.validators
            .lock()
            .map(|v| v.clone())
            .map_err(|_| RegistryError::Unavailable("registry lock poisoned".to_string()))
    }

    fn replace(&self, validators: &[CandidateEntry]) -> Result<(), RegistryError> {
        let mut current = self
            .validators
            .lock()
            .map_err(|_| RegistryError::Unavailable("registry lock poisoned".to_string()))?;
        *current = validators.to_vec();
        self.replacements.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
