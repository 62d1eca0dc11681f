// Contract Tests
// Initialization, method dispatch, queries and all-or-nothing commits

#[path = "common.rs"]
mod common;

use common::*;
use stakevote::governance::{
    CandidateEntry, ErrorKind, Governance, GovernanceError, Outcome, Query, Thresholds,
};
use stakevote::identity::Address;
use stakevote::ledger::Amount;
use stakevote::registry::{MemoryRegistry, RegistryError, ValidatorRegistry};
use stakevote::storage::{GovStore, KvStore, MemoryStore, StoreError, WriteBatch};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

const STAKE: u128 = 10 * 5_000_000_000_000;

/// Registry whose replace can be switched to fail
struct FlakyRegistry {
    inner: MemoryRegistry,
    fail_replace: AtomicBool,
}

impl FlakyRegistry {
    fn new(validators: Vec<CandidateEntry>) -> Self {
        Self {
            inner: MemoryRegistry::new(validators),
            fail_replace: AtomicBool::new(false),
        }
    }
}

impl ValidatorRegistry for FlakyRegistry {
    fn validators(&self) -> Result<Vec<CandidateEntry>, RegistryError> {
        self.inner.validators()
    }

    fn replace(&self, validators: &[CandidateEntry]) -> Result<(), RegistryError> {
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(RegistryError::Unavailable("consensus layer offline".to_string()));
        }
        self.inner.replace(validators)
    }
}

/// Store whose commit can be switched to fail
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_commit: AtomicBool,
}

impl KvStore for FlakyStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.load(key)
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(StoreError::DatabaseError("disk full".to_string()));
        }
        self.inner.commit(batch)
    }
}

fn flaky_governance(n: u32) -> (Governance<FlakyStore, FlakyRegistry>, Vec<Address>) {
    let validators = (0..n)
        .map(|i| CandidateEntry::new(addr(i), Amount::new(STAKE)))
        .collect();
    let gov = Governance::new(
        FlakyStore::default(),
        FlakyRegistry::new(validators),
        Thresholds::default(),
    );
    let pool = gov.init().unwrap();
    let ordered = pool.entries().iter().map(|e| e.address.clone()).collect();
    (gov, ordered)
}

fn listed(registry: &impl ValidatorRegistry) -> Vec<Address> {
    registry
        .validators()
        .unwrap()
        .into_iter()
        .map(|e| e.address)
        .collect()
}

// ============================================================================
// INITIALIZATION
// ============================================================================

#[test]
fn test_init_sorts_registry_and_pool() {
    let entries = vec![(addr(1), 10), (addr(2), 30), (addr(3), 20)];
    let gov = governance_with(entries, Thresholds::default());

    assert_eq!(registry_addresses(&gov), vec![addr(2), addr(3), addr(1)]);
    assert_registry_matches_pool(&gov);
}

#[test]
fn test_init_twice_fails() {
    let (gov, _) = governance_with_validators(3, STAKE);

    let result = gov.init();

    assert!(matches!(result, Err(GovernanceError::AlreadyInitialized)));
}

#[test]
fn test_init_with_empty_registry_fails() {
    let gov = Governance::new(
        MemoryStore::new(),
        MemoryRegistry::default(),
        Thresholds::default(),
    );

    assert!(matches!(gov.init(), Err(GovernanceError::EmptyValidatorSet)));
}

#[test]
fn test_init_rejects_duplicate_validators() {
    let validators = vec![
        CandidateEntry::new(addr(1), Amount::new(10)),
        CandidateEntry::new(addr(1), Amount::new(20)),
    ];
    let gov = Governance::new(
        MemoryStore::new(),
        MemoryRegistry::new(validators),
        Thresholds::default(),
    );

    assert!(matches!(gov.init(), Err(GovernanceError::PoolInconsistent(_))));
}

#[test]
fn test_init_rejects_more_validators_than_capacity() {
    let thresholds = Thresholds::default().with_validator_set_size(1);
    let validators = (0..3)
        .map(|i| CandidateEntry::new(addr(i), Amount::new(10)))
        .collect();
    let gov = Governance::new(MemoryStore::new(), MemoryRegistry::new(validators), thresholds);

    assert!(matches!(gov.init(), Err(GovernanceError::PoolInconsistent(_))));
    assert!(matches!(gov.candidates(), Err(GovernanceError::NotInitialized)));
    assert_eq!(gov.registry().replacement_count(), 0);
}

#[test]
fn test_init_from_rejected_list_leaves_registry_untouched() {
    let current = vec![CandidateEntry::new(addr(9), Amount::new(10))];
    let gov = Governance::new(
        MemoryStore::new(),
        MemoryRegistry::new(current.clone()),
        Thresholds::default(),
    );
    let genesis = vec![
        CandidateEntry::new(addr(1), Amount::new(10)),
        CandidateEntry::new(addr(1), Amount::new(20)),
    ];

    let result = gov.init_from(genesis);

    assert!(matches!(result, Err(GovernanceError::PoolInconsistent(_))));
    assert_eq!(gov.registry().validators().unwrap(), current);
    assert_eq!(gov.registry().replacement_count(), 0);
}

#[test]
fn test_init_from_sets_registry_to_top_of_pool() {
    let thresholds = Thresholds::default().with_validator_set_size(2);
    let gov = Governance::new(MemoryStore::new(), MemoryRegistry::default(), thresholds);
    let genesis = vec![
        CandidateEntry::new(addr(1), Amount::new(10)),
        CandidateEntry::new(addr(2), Amount::new(30)),
        CandidateEntry::new(addr(3), Amount::new(20)),
    ];

    let pool = gov.init_from(genesis).unwrap();

    assert_eq!(pool.len(), 3);
    assert_eq!(registry_addresses(&gov), vec![addr(2), addr(3)]);
    assert_registry_matches_pool(&gov);
}

#[test]
fn test_invoke_before_init_fails() {
    let validators = vec![CandidateEntry::new(addr(1), Amount::new(10))];
    let gov = Governance::new(
        MemoryStore::new(),
        MemoryRegistry::new(validators),
        Thresholds::default(),
    );

    let result = gov.pledge(&paying(&addr(2), min_pledge(), NOW));

    assert!(matches!(result, Err(GovernanceError::NotInitialized)));
}

// ============================================================================
// DISPATCH
// ============================================================================

#[test]
fn test_invoke_json_vote_for_applicant() {
    let (gov, validators) = governance_with_validators(10, STAKE);
    let applicant = addr(100);
    gov.invoke_json(&paying(&applicant, min_pledge(), NOW), r#"{"method":"pledgeCoin"}"#)
        .unwrap();

    let input = format!(
        r#"{{"method":"voteForApplicant","params":{{"address":"{}"}}}}"#,
        applicant
    );
    let receipt = gov.invoke_json(&ctx(&validators[0], NOW), &input).unwrap();

    assert!(matches!(receipt.outcome, Outcome::VotePending { votes: 1, quorum: 7 }));
}

#[test]
fn test_invoke_json_rejects_bad_address() {
    let (gov, validators) = governance_with_validators(3, STAKE);
    let input = r#"{"method":"voteForAbolish","params":{"address":"abc"}}"#;

    let err = gov.invoke_json(&ctx(&validators[0], NOW), input).unwrap_err();

    assert!(matches!(err, GovernanceError::InvalidAddress(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_invoke_json_unknown_method() {
    let (gov, validators) = governance_with_validators(3, STAKE);

    let err = gov
        .invoke_json(&ctx(&validators[0], NOW), r#"{"method":"setFee"}"#)
        .unwrap_err();

    assert!(matches!(err, GovernanceError::UnknownMethod(_)));
}

#[test]
fn test_error_kinds() {
    let (gov, validators) = governance_with_validators(3, STAKE);

    let err = gov
        .vote_for_abolish(&ctx(&addr(100), NOW), &validators[0])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let (single, only) = governance_with_validators(1, STAKE);
    let err = single.takeback(&ctx(&only[0], NOW)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invariant);
}

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_query_applicant_returns_raw_record() {
    let (gov, _) = governance_with_validators(3, STAKE);
    let applicant = addr(100);
    gov.pledge(&paying(&applicant, min_pledge(), NOW)).unwrap();

    let input = format!(
        r#"{{"method":"getApplicantProposal","params":{{"address":"{}"}}}}"#,
        applicant
    );
    let output: serde_json::Value =
        serde_json::from_str(&gov.query_json(&input).unwrap()).unwrap();

    let raw = gov
        .store()
        .load(&format!("applicant_{}", applicant))
        .unwrap()
        .unwrap();
    assert_eq!(output["application_proposal"], serde_json::Value::String(raw));
}

#[test]
fn test_query_missing_abolish_proposal_is_null() {
    let (gov, validators) = governance_with_validators(3, STAKE);

    let result = gov
        .query(&Query::AbolishProposal {
            address: validators[0].clone(),
        })
        .unwrap();

    assert!(result["abolish_proposal"].is_null());
}

#[test]
fn test_query_validators_and_candidates() {
    let (gov, validators) = governance_with_validators(3, STAKE);

    let result = gov.query(&Query::Validators).unwrap();
    let listed = result["current_validators"].as_array().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0][0], validators[0].to_string());

    let result = gov.query(&Query::Candidates).unwrap();
    assert!(result["current_candidates"].is_string());
}

// ============================================================================
// ATOMICITY
// ============================================================================

#[test]
fn test_failed_call_changes_nothing() {
    let (gov, validators) = governance_with_validators(10, STAKE);
    let applicant = addr(100);
    gov.pledge(&paying(&applicant, min_pledge(), NOW)).unwrap();
    gov.vote_for_applicant(&ctx(&validators[0], NOW), &applicant).unwrap();
    let record_before = gov.applicant(&applicant).unwrap();
    let pool_before = gov.candidates().unwrap();
    let syncs_before = gov.registry().replacement_count();

    assert!(gov.vote_for_applicant(&ctx(&validators[0], NOW), &applicant).is_err());
    assert!(gov
        .pledge(&paying(&applicant, Amount::new(1), NOW))
        .is_err());

    assert_eq!(gov.applicant(&applicant).unwrap(), record_before);
    assert_eq!(gov.candidates().unwrap(), pool_before);
    assert_eq!(gov.registry().replacement_count(), syncs_before);
}

#[test]
fn test_registry_failure_commits_nothing() {
    let (gov, validators) = flaky_governance(4);
    let leaving = &validators[1];
    gov.registry().fail_replace.store(true, Ordering::SeqCst);

    let result = gov.takeback(&ctx(leaving, NOW));

    assert!(matches!(result, Err(GovernanceError::Registry(_))));
    assert!(gov.candidates().unwrap().contains(leaving));
    assert!(listed(gov.registry()).contains(leaving));
}

#[test]
fn test_store_failure_restores_registry() {
    let (gov, validators) = flaky_governance(4);
    let leaving = &validators[1];
    gov.store().fail_commit.store(true, Ordering::SeqCst);

    let result = gov.takeback(&ctx(leaving, NOW));

    assert!(matches!(result, Err(GovernanceError::Store(_))));
    assert!(gov.candidates().unwrap().contains(leaving));
    assert_eq!(listed(gov.registry()), validators);
}

#[test]
fn test_call_succeeds_once_registry_recovers() {
    let (gov, validators) = flaky_governance(4);
    let leaving = &validators[1];
    gov.registry().fail_replace.store(true, Ordering::SeqCst);
    assert!(gov.takeback(&ctx(leaving, NOW)).is_err());

    gov.registry().fail_replace.store(false, Ordering::SeqCst);
    let receipt = gov.takeback(&ctx(leaving, NOW)).unwrap();

    assert!(receipt.validators_synced);
    assert_eq!(receipt.payouts.len(), 1);
    assert!(!listed(gov.registry()).contains(leaving));
    assert!(!gov.candidates().unwrap().contains(leaving));
}

// ============================================================================
// SLED-BACKED END TO END
// ============================================================================

#[test]
fn test_sled_store_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let store = GovStore::open(temp_dir.path()).unwrap();
    let genesis: Vec<_> = (0..3)
        .map(|i| CandidateEntry::new(addr(i), Amount::new(STAKE)))
        .collect();
    store.replace(&genesis).unwrap();

    let gov = Governance::new(&store, &store, Thresholds::default());
    gov.init().unwrap();
    let validators: Vec<_> = store.validators().unwrap().into_iter().map(|e| e.address).collect();

    let applicant = addr(100);
    gov.pledge(&paying(&applicant, min_pledge(), NOW)).unwrap();
    gov.vote_for_applicant(&ctx(&validators[0], NOW), &applicant).unwrap();
    let receipt = gov
        .vote_for_applicant(&ctx(&validators[1], NOW), &applicant)
        .unwrap();

    assert_eq!(receipt.outcome, Outcome::Promoted { position: 3 });
    assert_eq!(store.validators().unwrap().len(), 4);
    assert!(store.list_keys_with_prefix("applicant_").unwrap().is_empty());
    store.flush().unwrap();
}
