// Governance module - THE VALIDATOR SET
// Candidate pool, admission and abolition voting, withdrawal

mod abolition;
mod admission;
mod ballot;
mod candidate;
mod context;
mod contract;
mod error;
mod outcome;
mod pool;
mod records;
mod request;
mod session;
mod thresholds;
mod withdrawal;

pub use abolition::Slash;
pub use ballot::Ballot;
pub use candidate::CandidateEntry;
pub use context::CallContext;
pub use contract::Governance;
pub use error::{ErrorKind, GovernanceError};
pub use outcome::{Outcome, Receipt};
pub use pool::{CandidatePool, Insertion};
pub use records::{keys, AbolishProposal, Applicant};
pub use request::{Query, Request};
pub use thresholds::{Thresholds, ThresholdsError};
