// Call context - who is calling, when, and with how much coin

use crate::identity::Address;
use crate::ledger::Amount;

/// Values the host supplies for one invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Authenticated caller
    pub sender: Address,
    /// Block timestamp in microseconds
    pub block_timestamp: u64,
    /// Coin attached to the call
    pub pay_amount: Amount,
}

impl CallContext {
    pub fn new(sender: Address, block_timestamp: u64) -> Self {
        Self {
            sender,
            block_timestamp,
            pay_amount: Amount::ZERO,
        }
    }

    pub fn with_payment(mut self, amount: Amount) -> Self {
        self.pay_amount = amount;
        self
    }
}
