// Requests - method-name dispatch for writes and queries
// Input shape: {"method": "<name>", "params": {...}}

use crate::governance::error::GovernanceError;
use crate::identity::Address;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A state-changing call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    PledgeCoin,
    VoteForApplicant { applicant: Address },
    TakebackCoin,
    AbolishValidator { accused: Address, proof: String },
    QuitAbolish { accused: Address },
    VoteForAbolish { accused: Address },
}

/// A read-only call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Validators,
    Candidates,
    ApplicantProposal { address: Address },
    AbolishProposal { address: Address },
}

#[derive(Deserialize)]
struct Envelope {
    method: String,
    #[serde(default)]
    params: Option<Map<String, Value>>,
}

impl Envelope {
    fn parse(input: &str) -> Result<Self, GovernanceError> {
        serde_json::from_str(input).map_err(|e| GovernanceError::InvalidParams(e.to_string()))
    }

    fn string_param(&self, name: &str) -> Result<&str, GovernanceError> {
        self.params
            .as_ref()
            .and_then(|p| p.get(name))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                GovernanceError::InvalidParams(format!("missing string parameter '{}'", name))
            })
    }

    fn address_param(&self) -> Result<Address, GovernanceError> {
        Ok(Address::parse(self.string_param("address")?)?)
    }
}

impl Request {
    pub fn from_json(input: &str) -> Result<Self, GovernanceError> {
        let envelope = Envelope::parse(input)?;
        match envelope.method.as_str() {
            "pledgeCoin" => Ok(Self::PledgeCoin),
            "voteForApplicant" => Ok(Self::VoteForApplicant {
                applicant: envelope.address_param()?,
            }),
            "takebackCoin" => Ok(Self::TakebackCoin),
            "abolishValidator" => Ok(Self::AbolishValidator {
                accused: envelope.address_param()?,
                proof: envelope.string_param("proof")?.to_string(),
            }),
            "quitAbolish" => Ok(Self::QuitAbolish {
                accused: envelope.address_param()?,
            }),
            "voteForAbolish" => Ok(Self::VoteForAbolish {
                accused: envelope.address_param()?,
            }),
            other => Err(GovernanceError::UnknownMethod(other.to_string())),
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::PledgeCoin => "pledgeCoin",
            Self::VoteForApplicant { .. } => "voteForApplicant",
            Self::TakebackCoin => "takebackCoin",
            Self::AbolishValidator { .. } => "abolishValidator",
            Self::QuitAbolish { .. } => "quitAbolish",
            Self::VoteForAbolish { .. } => "voteForAbolish",
        }
    }
}

impl Query {
    pub fn from_json(input: &str) -> Result<Self, GovernanceError> {
        let envelope = Envelope::parse(input)?;
        match envelope.method.as_str() {
            "getValidators" => Ok(Self::Validators),
            "getCandidates" => Ok(Self::Candidates),
            "getApplicantProposal" => Ok(Self::ApplicantProposal {
                address: envelope.address_param()?,
            }),
            "getAbolishProposal" => Ok(Self::AbolishProposal {
                address: envelope.address_param()?,
            }),
            other => Err(GovernanceError::UnknownMethod(other.to_string())),
        }
    }
}
