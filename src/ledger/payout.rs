// Payout - A coin transfer out of the staking contract
// Refunds and slashing remainders are emitted as payouts for the host ledger to apply

use crate::identity::Address;
use crate::ledger::Amount;
use serde::{Deserialize, Serialize};

/// A transfer of `amount` from the staking contract to `dest`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub dest: Address,
    pub amount: Amount,
}

impl Payout {
    pub fn new(dest: Address, amount: Amount) -> Self {
        Self { dest, amount }
    }
}
