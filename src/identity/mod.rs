// Identity module - Account addresses
// Checksummed base58 identifiers for stakers and validators

mod address;

pub use address::*;
