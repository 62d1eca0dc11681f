// Thresholds - Voting and staking parameters
// Defaults match the network's fixed governance constants

use crate::ledger::Amount;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Basis points in one whole
const BPS_DENOMINATOR: u64 = 10_000;

/// Coin has 8 decimal places
const COIN: u128 = 100_000_000;

/// 15 days in microseconds
const DEFAULT_VOTE_INTERVAL_MICROS: u64 = 15 * 24 * 60 * 60 * 1_000_000;

#[derive(Error, Debug)]
pub enum ThresholdsError {
    #[error("Failed to read thresholds file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse thresholds: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid thresholds: {0}")]
    Invalid(String),
}

/// Governance parameters shared by every operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Number of active validators taken from the top of the pool
    pub validator_set_size: usize,
    /// Share of validators needed to pass a vote, in basis points
    pub pass_rate_bps: u32,
    /// How long a pledge or abolish proposal stays open, in microseconds
    pub effective_vote_interval_micros: u64,
    /// Smallest first pledge
    pub min_pledge_amount: Amount,
    /// Smallest top-up of an existing pledge or pool stake
    pub min_superaddition_amount: Amount,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            validator_set_size: 100,
            pass_rate_bps: 7_000,
            effective_vote_interval_micros: DEFAULT_VOTE_INTERVAL_MICROS,
            min_pledge_amount: Amount::new(50_000 * COIN),
            min_superaddition_amount: Amount::new(100 * COIN),
        }
    }
}

impl Thresholds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThresholdsError> {
        let data = fs::read_to_string(path)?;
        let thresholds: Thresholds = serde_json::from_str(&data)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn with_validator_set_size(mut self, size: usize) -> Self {
        self.validator_set_size = size;
        self
    }

    pub fn with_pass_rate_bps(mut self, bps: u32) -> Self {
        self.pass_rate_bps = bps;
        self
    }

    pub fn with_vote_interval_micros(mut self, micros: u64) -> Self {
        self.effective_vote_interval_micros = micros;
        self
    }

    pub fn with_min_pledge(mut self, amount: Amount) -> Self {
        self.min_pledge_amount = amount;
        self
    }

    pub fn with_min_superaddition(mut self, amount: Amount) -> Self {
        self.min_superaddition_amount = amount;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ThresholdsError> {
        if self.validator_set_size == 0 {
            return Err(ThresholdsError::Invalid(
                "validator_set_size cannot be 0".to_string(),
            ));
        }
        if self.pass_rate_bps == 0 || u64::from(self.pass_rate_bps) > BPS_DENOMINATOR {
            return Err(ThresholdsError::Invalid(format!(
                "pass_rate_bps must be in 1..=10000, got {}",
                self.pass_rate_bps
            )));
        }
        if self.min_pledge_amount.is_zero() || self.min_superaddition_amount.is_zero() {
            return Err(ThresholdsError::Invalid(
                "minimum amounts cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Maximum number of pool entries
    pub fn pool_capacity(&self) -> usize {
        self.validator_set_size * 2
    }

    /// Votes needed among `validator_count` validators: floor(count * rate + 0.5)
    pub fn quorum(&self, validator_count: usize) -> usize {
        let scaled = validator_count as u64 * u64::from(self.pass_rate_bps) + BPS_DENOMINATOR / 2;
        (scaled / BPS_DENOMINATOR) as usize
    }

    /// Deadline for a vote opened at `now`
    pub fn vote_deadline(&self, now: u64) -> u64 {
        now.saturating_add(self.effective_vote_interval_micros)
    }
}
