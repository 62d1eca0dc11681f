// Withdrawal - reclaim a pending pledge or a pool stake

use crate::governance::context::CallContext;
use crate::governance::error::GovernanceError;
use crate::governance::outcome::Outcome;
use crate::governance::records::{keys, Applicant};
use crate::governance::session::Session;
use crate::governance::thresholds::Thresholds;
use crate::storage::KvStore;
use tracing::info;

pub(crate) fn takeback<S: KvStore>(
    session: &mut Session<'_, S>,
    ctx: &CallContext,
    thresholds: &Thresholds,
) -> Result<Outcome, GovernanceError> {
    let caller = &ctx.sender;
    let key = keys::applicant(caller);

    if let Some(applicant) = session.load_record::<Applicant>(&key)? {
        if session.pool().contains(caller) {
            return Err(GovernanceError::ConflictingRecords(caller.clone()));
        }
        session.pay(caller, applicant.pledge);
        session.delete_record(&key);
        info!(applicant = %caller, amount = %applicant.pledge, "Pledge taken back");
        return Ok(Outcome::Withdrawn {
            amount: applicant.pledge,
        });
    }

    let Some(position) = session.pool().position(caller) else {
        return Ok(Outcome::NothingToWithdraw);
    };
    if session.pool().len() <= 1 {
        return Err(GovernanceError::LastCandidate);
    }

    let entry = session
        .pool_mut()
        .remove(position)
        .ok_or_else(|| GovernanceError::CandidateMissing(caller.clone()))?;
    session.pay(caller, entry.stake);
    info!(candidate = %caller, amount = %entry.stake, position, "Candidate stake taken back");

    if position < thresholds.validator_set_size {
        session.sync_validators(thresholds.validator_set_size);
    }
    Ok(Outcome::Withdrawn { amount: entry.stake })
}
