// stakevote - staked validator admission and abolition
//
// Participants pledge coin to enter a bounded, ranked candidate pool whose top
// entries form the active validator set. Validators vote applicants in and vote
// misbehaving validators out, slashing part of their stake.

pub mod governance;
pub mod identity;
pub mod ledger;
pub mod registry;
pub mod storage;
