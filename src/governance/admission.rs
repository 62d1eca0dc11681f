// Admission - pledge, vote, promote
//
// unpledged -> pledged -> promoted | refunded on expiry | withdrawn

use crate::governance::context::CallContext;
use crate::governance::error::GovernanceError;
use crate::governance::outcome::Outcome;
use crate::governance::pool::Insertion;
use crate::governance::records::{keys, Applicant};
use crate::governance::session::Session;
use crate::governance::thresholds::Thresholds;
use crate::identity::Address;
use crate::storage::KvStore;
use tracing::{debug, info, warn};

/// Pledge coin to apply, or add to an existing pledge or pool stake
pub(crate) fn pledge<S: KvStore>(
    session: &mut Session<'_, S>,
    ctx: &CallContext,
    thresholds: &Thresholds,
) -> Result<Outcome, GovernanceError> {
    let caller = &ctx.sender;
    let amount = ctx.pay_amount;
    let applicant_key = keys::applicant(caller);
    let existing: Option<Applicant> = session.load_record(&applicant_key)?;

    if let Some(position) = session.pool().position(caller) {
        if existing.is_some() {
            return Err(GovernanceError::ConflictingRecords(caller.clone()));
        }
        require_superaddition(ctx, thresholds)?;

        let pool = session.pool_mut();
        let entry = pool
            .remove(position)
            .ok_or_else(|| GovernanceError::CandidateMissing(caller.clone()))?;
        let stake = entry.stake.checked_add(amount)?;
        let position = match pool.insert_sorted(caller.clone(), stake, thresholds.pool_capacity()) {
            Insertion::Inserted { position } => position,
            Insertion::PoolFull => {
                return Err(GovernanceError::PoolInconsistent(
                    "no room to re-insert a topped-up candidate".to_string(),
                ))
            }
        };
        info!(candidate = %caller, stake = %stake, position, "Candidate stake topped up");

        if position < thresholds.validator_set_size {
            session.sync_validators(thresholds.validator_set_size);
        }
        return Ok(Outcome::ToppedUp { stake, position });
    }

    let expires_at = thresholds.vote_deadline(ctx.block_timestamp);
    let applicant = match existing {
        Some(mut applicant) => {
            require_superaddition(ctx, thresholds)?;
            applicant.pledge = applicant.pledge.checked_add(amount)?;
            // Topping up reopens the voting window
            applicant.expires_at = expires_at;
            applicant
        }
        None => {
            if amount < thresholds.min_pledge_amount {
                return Err(GovernanceError::PledgeTooSmall {
                    amount,
                    minimum: thresholds.min_pledge_amount,
                });
            }
            Applicant::new(amount, expires_at)
        }
    };

    session.put_record(&applicant_key, &applicant)?;
    info!(applicant = %caller, pledge = %applicant.pledge, expires_at, "Pledge recorded");
    Ok(Outcome::Pledged {
        pledge: applicant.pledge,
        expires_at,
    })
}

/// A validator approves an applicant
pub(crate) fn vote_for_applicant<S: KvStore>(
    session: &mut Session<'_, S>,
    ctx: &CallContext,
    applicant: &Address,
    thresholds: &Thresholds,
) -> Result<Outcome, GovernanceError> {
    let voter = &ctx.sender;
    if !session.is_validator(voter) {
        return Err(GovernanceError::NotValidator(voter.clone()));
    }

    let key = keys::applicant(applicant);
    let Some(mut record) = session.load_record::<Applicant>(&key)? else {
        info!(applicant = %applicant, "No pending pledge, voting maybe passed or expired");
        return Ok(Outcome::AlreadyResolved);
    };

    if record.is_expired(ctx.block_timestamp) {
        warn!(applicant = %applicant, "Vote time is expired, applicant refused");
        session.pay(applicant, record.pledge);
        session.delete_record(&key);
        return Ok(Outcome::Expired);
    }

    let capacity = thresholds.pool_capacity();
    if session.pool().len() >= capacity {
        warn!(capacity, "Validator candidates are enough");
        return Ok(Outcome::PoolFull);
    }
    if session.pool().contains(applicant) {
        return Err(GovernanceError::ConflictingRecords(applicant.clone()));
    }

    if !record.ballot.cast(voter.clone()) {
        return Err(GovernanceError::AlreadyVoted(voter.clone()));
    }

    let quorum = thresholds.quorum(session.validator_count());
    let votes = record.ballot.len();
    if votes < quorum {
        session.put_record(&key, &record)?;
        debug!(applicant = %applicant, votes, quorum, "Admission vote pending");
        return Ok(Outcome::VotePending { votes, quorum });
    }

    let position = match session
        .pool_mut()
        .insert_sorted(applicant.clone(), record.pledge, capacity)
    {
        Insertion::Inserted { position } => position,
        Insertion::PoolFull => return Ok(Outcome::PoolFull),
    };
    session.delete_record(&key);
    info!(applicant = %applicant, stake = %record.pledge, position, "Applicant promoted to candidate");

    if position < thresholds.validator_set_size {
        session.sync_validators(thresholds.validator_set_size);
    }
    Ok(Outcome::Promoted { position })
}

fn require_superaddition(ctx: &CallContext, thresholds: &Thresholds) -> Result<(), GovernanceError> {
    if ctx.pay_amount < thresholds.min_superaddition_amount {
        return Err(GovernanceError::SuperadditionTooSmall {
            amount: ctx.pay_amount,
            minimum: thresholds.min_superaddition_amount,
        });
    }
    Ok(())
}
