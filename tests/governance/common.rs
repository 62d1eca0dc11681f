// Shared fixtures for governance tests

#![allow(dead_code)]

use stakevote::governance::{CallContext, CandidateEntry, Governance, Thresholds};
use stakevote::identity::Address;
use stakevote::ledger::Amount;
use stakevote::registry::MemoryRegistry;
use stakevote::storage::MemoryStore;

pub type TestGovernance = Governance<MemoryStore, MemoryRegistry>;

/// Block time used as "now" by most tests
pub const NOW: u64 = 1_700_000_000_000_000;

/// Deterministic address for index `i`
pub fn addr(i: u32) -> Address {
    let mut key = [0u8; 32];
    key[..4].copy_from_slice(&i.to_be_bytes());
    Address::from_public_key(&key).unwrap()
}

pub fn min_pledge() -> Amount {
    Thresholds::default().min_pledge_amount
}

pub fn min_superaddition() -> Amount {
    Thresholds::default().min_superaddition_amount
}

pub fn ctx(sender: &Address, now: u64) -> CallContext {
    CallContext::new(sender.clone(), now)
}

pub fn paying(sender: &Address, amount: Amount, now: u64) -> CallContext {
    CallContext::new(sender.clone(), now).with_payment(amount)
}

/// Initialized governance whose registry holds the given (address, stake) pairs
pub fn governance_with(entries: Vec<(Address, u128)>, thresholds: Thresholds) -> TestGovernance {
    let validators = entries
        .into_iter()
        .map(|(a, s)| CandidateEntry::new(a, Amount::new(s)))
        .collect();
    let gov = Governance::new(MemoryStore::new(), MemoryRegistry::new(validators), thresholds);
    gov.init().unwrap();
    gov
}

/// `n` validators with distinct addresses and equal stake; returns them in pool order
pub fn governance_with_validators(n: u32, stake: u128) -> (TestGovernance, Vec<Address>) {
    let entries = (0..n).map(|i| (addr(i), stake)).collect();
    let gov = governance_with(entries, Thresholds::default());
    let ordered = gov
        .candidates()
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.address.clone())
        .collect();
    (gov, ordered)
}

/// Registry contents as addresses
pub fn registry_addresses(gov: &TestGovernance) -> Vec<Address> {
    use stakevote::registry::ValidatorRegistry;
    gov.registry()
        .validators()
        .unwrap()
        .into_iter()
        .map(|e| e.address)
        .collect()
}

/// Registry equals the first `n` pool entries, in order
pub fn assert_registry_matches_pool(gov: &TestGovernance) {
    use stakevote::registry::ValidatorRegistry;
    let pool = gov.candidates().unwrap();
    let n = gov.thresholds().validator_set_size;
    let registry = gov.registry().validators().unwrap();
    assert_eq!(registry.as_slice(), pool.top(n));
}
