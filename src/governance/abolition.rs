// Abolition - accuse, vote, slash
//
// none -> proposed -> executed | expired | withdrawn
//
// On quorum the accused loses a tenth of their stake. The forfeit is split
// evenly across the remaining validators, with the indivisible remainder going
// to the top candidate.

use crate::governance::context::CallContext;
use crate::governance::error::GovernanceError;
use crate::governance::outcome::Outcome;
use crate::governance::records::{keys, AbolishProposal};
use crate::governance::session::Session;
use crate::governance::thresholds::Thresholds;
use crate::identity::Address;
use crate::ledger::{Amount, AmountError};
use crate::storage::KvStore;
use tracing::{debug, info, warn};

/// Portion of stake kept by an abolished validator is (FORFEIT_DIVISOR - 1) / FORFEIT_DIVISOR
const FORFEIT_DIVISOR: u128 = 10;

/// How a forfeit is split among `recipients` validators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slash {
    pub forfeit: Amount,
    pub refund: Amount,
    pub share: Amount,
    pub remainder: Amount,
}

impl Slash {
    /// Compute the slash of `stake` shared by `recipients` validators
    pub fn compute(stake: Amount, recipients: usize) -> Result<Self, AmountError> {
        let forfeit = stake.checked_div(FORFEIT_DIVISOR)?;
        let refund = stake.checked_sub(forfeit)?;
        let share = forfeit.checked_div(recipients as u128)?;
        let remainder = forfeit.checked_rem(recipients as u128)?;
        Ok(Self {
            forfeit,
            refund,
            share,
            remainder,
        })
    }
}

/// A validator accuses another validator
pub(crate) fn propose<S: KvStore>(
    session: &mut Session<'_, S>,
    ctx: &CallContext,
    accused: &Address,
    proof: &str,
    thresholds: &Thresholds,
) -> Result<Outcome, GovernanceError> {
    let proposer = &ctx.sender;
    if !session.is_validator(proposer) {
        return Err(GovernanceError::NotValidator(proposer.clone()));
    }
    if !session.is_validator(accused) {
        return Err(GovernanceError::AccusedNotValidator(accused.clone()));
    }

    let key = keys::abolish(accused);
    if let Some(mut existing) = session.load_record::<AbolishProposal>(&key)? {
        if existing.deadline_reached(ctx.block_timestamp) {
            info!(accused = %accused, "Update expired time of abolishing validator");
            existing.expires_at = ctx.block_timestamp;
            session.put_record(&key, &existing)?;
            return Ok(Outcome::ProposalClosed);
        }
        info!(accused = %accused, "Already abolishing validator");
        return Ok(Outcome::ProposalActive);
    }

    let expires_at = thresholds.vote_deadline(ctx.block_timestamp);
    let proposal = AbolishProposal::new(
        accused.clone(),
        proposer.clone(),
        proof.to_string(),
        expires_at,
    );
    session.put_record(&key, &proposal)?;
    info!(accused = %accused, proposer = %proposer, expires_at, "Abolish proposal opened");
    Ok(Outcome::Proposed { expires_at })
}

/// The proposer withdraws their own proposal
pub(crate) fn quit<S: KvStore>(
    session: &mut Session<'_, S>,
    ctx: &CallContext,
    accused: &Address,
) -> Result<Outcome, GovernanceError> {
    let key = keys::abolish(accused);
    let proposal = session
        .load_record::<AbolishProposal>(&key)?
        .ok_or_else(|| GovernanceError::ProposalNotFound(accused.clone()))?;

    if proposal.proposer != ctx.sender {
        return Err(GovernanceError::NotProposer {
            caller: ctx.sender.clone(),
            proposer: proposal.proposer,
        });
    }

    session.delete_record(&key);
    info!(accused = %accused, proposer = %ctx.sender, "Abolish proposal withdrawn");
    Ok(Outcome::ProposalWithdrawn)
}

/// A validator votes to abolish the accused
pub(crate) fn vote<S: KvStore>(
    session: &mut Session<'_, S>,
    ctx: &CallContext,
    accused: &Address,
    thresholds: &Thresholds,
) -> Result<Outcome, GovernanceError> {
    let validator_count = session.validator_count();
    if validator_count < 2 {
        return Err(GovernanceError::InsufficientValidators(validator_count));
    }

    let voter = &ctx.sender;
    if !session.is_validator(voter) {
        return Err(GovernanceError::NotValidator(voter.clone()));
    }
    if !session.is_validator(accused) {
        return Err(GovernanceError::AccusedNotValidator(accused.clone()));
    }

    let key = keys::abolish(accused);
    let Some(mut proposal) = session.load_record::<AbolishProposal>(&key)? else {
        info!(accused = %accused, "No abolish proposal, voting maybe passed or expired");
        return Ok(Outcome::AlreadyResolved);
    };

    if proposal.is_expired(ctx.block_timestamp) {
        warn!(accused = %accused, "Voting time expired, validator retained");
        session.delete_record(&key);
        return Ok(Outcome::Retained);
    }

    if !proposal.ballot.cast(voter.clone()) {
        return Err(GovernanceError::AlreadyVoted(voter.clone()));
    }

    let quorum = thresholds.quorum(validator_count);
    let votes = proposal.ballot.len();
    if votes < quorum {
        session.put_record(&key, &proposal)?;
        debug!(accused = %accused, votes, quorum, "Abolish vote pending");
        return Ok(Outcome::VotePending { votes, quorum });
    }

    let position = session
        .pool()
        .position(accused)
        .ok_or_else(|| GovernanceError::CandidateMissing(accused.clone()))?;

    let recipients = validator_count - 1;
    let pool = session.pool_mut();
    let entry = pool
        .remove(position)
        .ok_or_else(|| GovernanceError::CandidateMissing(accused.clone()))?;
    if pool.len() < recipients {
        return Err(GovernanceError::PoolInconsistent(format!(
            "{} candidates left to share a forfeit among {} validators",
            pool.len(),
            recipients
        )));
    }

    let slash = Slash::compute(entry.stake, recipients)?;
    if !slash.remainder.is_zero() {
        pool.credit(0, slash.remainder)?;
    }
    for i in 0..recipients {
        pool.credit(i, slash.share)?;
    }

    session.pay(accused, slash.refund);
    session.delete_record(&key);
    info!(
        accused = %accused,
        forfeit = %slash.forfeit,
        share = %slash.share,
        remainder = %slash.remainder,
        "Validator abolished"
    );
    session.sync_validators(thresholds.validator_set_size);

    Ok(Outcome::Abolished {
        accused: accused.clone(),
        refunded: slash.refund,
        forfeit: slash.forfeit,
        share: slash.share,
        remainder: slash.remainder,
    })
}
