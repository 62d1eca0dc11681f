// Ledger module - COIN ARITHMETIC
// Checked amounts and the transfers an operation asks the host ledger to make

mod amount;
mod payout;

pub use amount::{Amount, AmountError};
pub use payout::Payout;
