use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Network prefix bytes at the front of every decoded address
const ADDRESS_PREFIX: [u8; 4] = [0x12, 0x1E, 0x0D, 0xA4];

/// Signature type byte for ed25519 keys
const SIGN_TYPE_ED25519: u8 = 1;

const HASH_LEN: usize = 20;
const CHECKSUM_LEN: usize = 4;
const DECODED_LEN: usize = ADDRESS_PREFIX.len() + 1 + HASH_LEN + CHECKSUM_LEN;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address cannot be empty")]
    Empty,

    #[error("Invalid base58 encoding: {0}")]
    InvalidBase58(String),

    #[error("Invalid address length: expected 29 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid address prefix")]
    InvalidPrefix,

    #[error("Unsupported signature type: {0}")]
    UnsupportedSignType(u8),

    #[error("Address checksum mismatch")]
    ChecksumMismatch,

    #[error("Public key cannot be empty")]
    EmptyPublicKey,
}

/// A validated account address
///
/// Layout before base58 encoding: 4-byte prefix, 1-byte signature type,
/// last 20 bytes of SHA-256(public key), 4-byte double SHA-256 checksum.
/// Addresses order by their encoded string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(String);

impl Address {
    /// Derive the address of an ed25519 public key
    pub fn from_public_key(public_key: &[u8]) -> Result<Self, AddressError> {
        if public_key.is_empty() {
            return Err(AddressError::EmptyPublicKey);
        }

        let hash = Sha256::digest(public_key);
        let mut raw = Vec::with_capacity(DECODED_LEN);
        raw.extend_from_slice(&ADDRESS_PREFIX);
        raw.push(SIGN_TYPE_ED25519);
        raw.extend_from_slice(&hash[hash.len() - HASH_LEN..]);
        let sum = checksum(&raw);
        raw.extend_from_slice(&sum);

        Ok(Self(bs58::encode(raw).into_string()))
    }

    /// Parse and validate an encoded address
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;

        if bytes.len() != DECODED_LEN {
            return Err(AddressError::InvalidLength(bytes.len()));
        }
        if bytes[..ADDRESS_PREFIX.len()] != ADDRESS_PREFIX {
            return Err(AddressError::InvalidPrefix);
        }
        let sign_type = bytes[ADDRESS_PREFIX.len()];
        if sign_type != SIGN_TYPE_ED25519 {
            return Err(AddressError::UnsupportedSignType(sign_type));
        }

        let (body, tail) = bytes.split_at(DECODED_LEN - CHECKSUM_LEN);
        if checksum(body) != tail {
            return Err(AddressError::ChecksumMismatch);
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn checksum(body: &[u8]) -> [u8; CHECKSUM_LEN] {
    let second = Sha256::digest(Sha256::digest(body));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&second[..CHECKSUM_LEN]);
    out
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}
