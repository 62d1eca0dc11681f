// Governance - the staking contract's entry points
//
// Each invocation runs against a fresh Session. Its staged writes are
// committed only when the operation returns Ok.

use crate::governance::abolition;
use crate::governance::admission;
use crate::governance::candidate::CandidateEntry;
use crate::governance::context::CallContext;
use crate::governance::error::GovernanceError;
use crate::governance::outcome::Receipt;
use crate::governance::pool::CandidatePool;
use crate::governance::records::{keys, AbolishProposal, Applicant};
use crate::governance::request::{Query, Request};
use crate::governance::session::Session;
use crate::governance::thresholds::Thresholds;
use crate::governance::withdrawal;
use crate::identity::Address;
use crate::registry::ValidatorRegistry;
use crate::storage::{KvStore, WriteBatch};
use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::{error, info, info_span};

pub struct Governance<S, R> {
    store: S,
    registry: R,
    thresholds: Thresholds,
}

impl<S: KvStore, R: ValidatorRegistry> Governance<S, R> {
    pub fn new(store: S, registry: R, thresholds: Thresholds) -> Self {
        Self {
            store,
            registry,
            thresholds,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Seed the candidate pool from the registry's current validators
    pub fn init(&self) -> Result<CandidatePool, GovernanceError> {
        let validators = self.registry.validators()?;
        self.init_from(validators)
    }

    /// Seed the candidate pool from a genesis list
    ///
    /// The list is checked before anything is written; on success the
    /// registry holds the top of the sorted pool.
    pub fn init_from(&self, validators: Vec<CandidateEntry>) -> Result<CandidatePool, GovernanceError> {
        self.thresholds.validate()?;
        if self.store.load(keys::CANDIDATES)?.is_some() {
            return Err(GovernanceError::AlreadyInitialized);
        }

        if validators.is_empty() {
            return Err(GovernanceError::EmptyValidatorSet);
        }
        let mut seen = HashSet::new();
        if let Some(dup) = validators.iter().find(|v| !seen.insert(&v.address)) {
            return Err(GovernanceError::PoolInconsistent(format!(
                "duplicate validator {}",
                dup.address
            )));
        }
        if validators.len() > self.thresholds.pool_capacity() {
            return Err(GovernanceError::PoolInconsistent(format!(
                "{} validators exceed pool capacity {}",
                validators.len(),
                self.thresholds.pool_capacity()
            )));
        }

        let pool = CandidatePool::from_entries(validators);
        let mut batch = WriteBatch::new();
        batch.put(keys::CANDIDATES, serde_json::to_string(&pool)?);
        let previous = self.registry.validators()?;
        self.apply(
            batch,
            Some(pool.top(self.thresholds.validator_set_size).to_vec()),
            &previous,
        )?;
        info!(candidates = pool.len(), "Candidate pool initialized");
        Ok(pool)
    }

    /// Run one state-changing call
    pub fn invoke(&self, ctx: &CallContext, request: &Request) -> Result<Receipt, GovernanceError> {
        let span = info_span!("invoke", method = request.method(), sender = %ctx.sender);
        let _guard = span.enter();

        let mut session = Session::begin(&self.store, &self.registry)?;
        let thresholds = &self.thresholds;
        let outcome = match request {
            Request::PledgeCoin => admission::pledge(&mut session, ctx, thresholds)?,
            Request::VoteForApplicant { applicant } => {
                admission::vote_for_applicant(&mut session, ctx, applicant, thresholds)?
            }
            Request::TakebackCoin => withdrawal::takeback(&mut session, ctx, thresholds)?,
            Request::AbolishValidator { accused, proof } => {
                abolition::propose(&mut session, ctx, accused, proof, thresholds)?
            }
            Request::QuitAbolish { accused } => abolition::quit(&mut session, ctx, accused)?,
            Request::VoteForAbolish { accused } => {
                abolition::vote(&mut session, ctx, accused, thresholds)?
            }
        };

        let changes = session.finish()?;
        let validators_synced = changes.validators.is_some();
        self.apply(changes.batch, changes.validators, &changes.previous_validators)?;

        Ok(Receipt {
            outcome,
            payouts: changes.payouts,
            validators_synced,
        })
    }

    /// Write a call's staged changes as one unit
    ///
    /// The registry is replaced before the batch commits; if the commit fails
    /// the previous validator list is put back.
    fn apply(
        &self,
        batch: WriteBatch,
        validators: Option<Vec<CandidateEntry>>,
        previous: &[CandidateEntry],
    ) -> Result<(), GovernanceError> {
        let Some(validators) = validators else {
            self.store.commit(batch)?;
            return Ok(());
        };

        self.registry.replace(&validators)?;
        if let Err(e) = self.store.commit(batch) {
            if let Err(restore) = self.registry.replace(previous) {
                error!(error = %restore, "Failed to restore validator registry");
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Parse and run a JSON request
    pub fn invoke_json(&self, ctx: &CallContext, input: &str) -> Result<Receipt, GovernanceError> {
        let request = Request::from_json(input)?;
        self.invoke(ctx, &request)
    }

    pub fn pledge(&self, ctx: &CallContext) -> Result<Receipt, GovernanceError> {
        self.invoke(ctx, &Request::PledgeCoin)
    }

    pub fn vote_for_applicant(&self, ctx: &CallContext, applicant: &Address) -> Result<Receipt, GovernanceError> {
        self.invoke(
            ctx,
            &Request::VoteForApplicant {
                applicant: applicant.clone(),
            },
        )
    }

    pub fn takeback(&self, ctx: &CallContext) -> Result<Receipt, GovernanceError> {
        self.invoke(ctx, &Request::TakebackCoin)
    }

    pub fn abolish_validator(&self, ctx: &CallContext, accused: &Address, proof: &str) -> Result<Receipt, GovernanceError> {
        self.invoke(
            ctx,
            &Request::AbolishValidator {
                accused: accused.clone(),
                proof: proof.to_string(),
            },
        )
    }

    pub fn quit_abolish(&self, ctx: &CallContext, accused: &Address) -> Result<Receipt, GovernanceError> {
        self.invoke(
            ctx,
            &Request::QuitAbolish {
                accused: accused.clone(),
            },
        )
    }

    pub fn vote_for_abolish(&self, ctx: &CallContext, accused: &Address) -> Result<Receipt, GovernanceError> {
        self.invoke(
            ctx,
            &Request::VoteForAbolish {
                accused: accused.clone(),
            },
        )
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Answer a read-only query with the raw stored records
    pub fn query(&self, query: &Query) -> Result<Value, GovernanceError> {
        let result = match query {
            Query::Validators => {
                json!({ "current_validators": self.registry.validators()? })
            }
            Query::Candidates => {
                json!({ "current_candidates": self.store.load(keys::CANDIDATES)? })
            }
            Query::ApplicantProposal { address } => {
                json!({ "application_proposal": self.store.load(&keys::applicant(address))? })
            }
            Query::AbolishProposal { address } => {
                json!({ "abolish_proposal": self.store.load(&keys::abolish(address))? })
            }
        };
        Ok(result)
    }

    pub fn query_json(&self, input: &str) -> Result<String, GovernanceError> {
        let query = Query::from_json(input)?;
        Ok(serde_json::to_string(&self.query(&query)?)?)
    }

    /// The stored candidate pool
    pub fn candidates(&self) -> Result<CandidatePool, GovernanceError> {
        match self.store.load(keys::CANDIDATES)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Err(GovernanceError::NotInitialized),
        }
    }

    pub fn applicant(&self, address: &Address) -> Result<Option<Applicant>, GovernanceError> {
        self.load_typed(&keys::applicant(address))
    }

    pub fn abolish_proposal(&self, address: &Address) -> Result<Option<AbolishProposal>, GovernanceError> {
        self.load_typed(&keys::abolish(address))
    }

    fn load_typed<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, GovernanceError> {
        match self.store.load(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}
