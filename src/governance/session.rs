// Session - one call's view of governance state
//
// Loads the validator list and candidate pool once at call entry, stages every
// write and payout, and hands them back as `Changes` for the caller to commit.
// Dropping a session discards everything it staged.

use crate::governance::candidate::CandidateEntry;
use crate::governance::error::GovernanceError;
use crate::governance::pool::CandidatePool;
use crate::governance::records::keys;
use crate::identity::Address;
use crate::ledger::{Amount, Payout};
use crate::registry::ValidatorRegistry;
use crate::storage::{KvStore, WriteBatch};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Staged effects of a finished call
#[derive(Debug, Default)]
pub(crate) struct Changes {
    pub batch: WriteBatch,
    pub payouts: Vec<Payout>,
    pub validators: Option<Vec<CandidateEntry>>,
    /// Registry contents when the call began
    pub previous_validators: Vec<CandidateEntry>,
}

pub(crate) struct Session<'a, S: KvStore> {
    store: &'a S,
    initial_validators: Vec<CandidateEntry>,
    validators: Vec<CandidateEntry>,
    pool: CandidatePool,
    pool_dirty: bool,
    batch: WriteBatch,
    payouts: Vec<Payout>,
    synced: Option<Vec<CandidateEntry>>,
}

impl<'a, S: KvStore> Session<'a, S> {
    /// Load validators and the candidate pool
    pub fn begin<R: ValidatorRegistry>(store: &'a S, registry: &R) -> Result<Self, GovernanceError> {
        let validators = registry.validators()?;
        let pool = match store.load(keys::CANDIDATES)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => return Err(GovernanceError::NotInitialized),
        };

        Ok(Self {
            store,
            initial_validators: validators.clone(),
            validators,
            pool,
            pool_dirty: false,
            batch: WriteBatch::new(),
            payouts: Vec::new(),
            synced: None,
        })
    }

    // ========================================================================
    // VALIDATORS
    // ========================================================================

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    pub fn is_validator(&self, address: &Address) -> bool {
        self.validators.iter().any(|v| &v.address == address)
    }

    /// Replace the validator set with the top of the pool
    pub fn sync_validators(&mut self, validator_set_size: usize) {
        let top = self.pool.top(validator_set_size).to_vec();
        info!(validators = top.len(), "Set new validator set from candidates");
        self.validators = top.clone();
        self.synced = Some(top);
    }

    // ========================================================================
    // CANDIDATE POOL
    // ========================================================================

    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// Mutable pool access; the pool will be written back on commit
    pub fn pool_mut(&mut self) -> &mut CandidatePool {
        self.pool_dirty = true;
        &mut self.pool
    }

    // ========================================================================
    // RECORDS
    // ========================================================================

    /// Load a JSON record, seeing this session's own staged writes
    pub fn load_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, GovernanceError> {
        let raw = match self.batch.get(key) {
            Some(staged) => staged.map(str::to_string),
            None => self.store.load(key)?,
        };
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn put_record<T: Serialize>(&mut self, key: &str, record: &T) -> Result<(), GovernanceError> {
        let value = serde_json::to_string(record)?;
        debug!(key, value = %value, "Set record");
        self.batch.put(key, value);
        Ok(())
    }

    pub fn delete_record(&mut self, key: &str) {
        debug!(key, "Delete record");
        self.batch.delete(key);
    }

    // ========================================================================
    // PAYOUTS
    // ========================================================================

    /// Queue a transfer to `dest`; zero amounts are skipped
    pub fn pay(&mut self, dest: &Address, amount: Amount) {
        if amount.is_zero() {
            return;
        }
        info!(dest = %dest, amount = %amount, "Pay coin");
        self.payouts.push(Payout::new(dest.clone(), amount));
    }

    /// Finish the call, producing everything to commit
    pub fn finish(mut self) -> Result<Changes, GovernanceError> {
        if self.pool_dirty {
            let value = serde_json::to_string(&self.pool)?;
            self.batch.put(keys::CANDIDATES, value);
        }
        Ok(Changes {
            batch: self.batch,
            payouts: self.payouts,
            validators: self.synced,
            previous_validators: self.initial_validators,
        })
    }
}
