use crate::encoding::BLOCK_BYTES;
use crate::error::{Result, SkeinError};
use crate::ubi::BlockType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema identifier: ASCII "SHA3" followed by version 1, little-endian.
pub const SCHEMA_ID: u64 = 0x0000_0001_3341_4853;

/// Optional Skein configuration fields. An empty field is not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub key: Vec<u8>,
    pub personal: Vec<u8>,
    pub public_key: Vec<u8>,
    pub key_id: Vec<u8>,
    pub nonce: Vec<u8>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_personal(mut self, personal: impl Into<Vec<u8>>) -> Self {
        self.personal = personal.into();
        self
    }

    pub fn with_public_key(mut self, public_key: impl Into<Vec<u8>>) -> Self {
        self.public_key = public_key.into();
        self
    }

    pub fn with_key_id(mut self, key_id: impl Into<Vec<u8>>) -> Self {
        self.key_id = key_id.into();
        self
    }

    pub fn with_nonce(mut self, nonce: impl Into<Vec<u8>>) -> Self {
        self.nonce = nonce.into();
        self
    }

    /// Chains processed after the mandatory config block, in their fixed order.
    /// Empty fields are skipped.
    pub(crate) fn trailing_chains(&self) -> impl Iterator<Item = (BlockType, &[u8])> {
        [
            (BlockType::Personal, self.personal.as_slice()),
            (BlockType::PublicKey, self.public_key.as_slice()),
            (BlockType::KeyId, self.key_id.as_slice()),
            (BlockType::Nonce, self.nonce.as_slice()),
        ]
        .into_iter()
        .filter(|(_, data)| !data.is_empty())
    }

    /// Parse a JSON config document with hex-encoded fields.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.try_into()
    }

    /// Load a JSON config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ConfigFile::from(self))?)
    }

    /// Overlay every non-empty field of `other` onto `self`.
    pub fn merge(mut self, other: Config) -> Self {
        let fields = [
            (&mut self.key, other.key),
            (&mut self.personal, other.personal),
            (&mut self.public_key, other.public_key),
            (&mut self.key_id, other.key_id),
            (&mut self.nonce, other.nonce),
        ];
        for (dst, src) in fields {
            if !src.is_empty() {
                *dst = src;
            }
        }
        self
    }
}

/// The 32-byte config block: schema id, output length in bits, then zeros
/// (no tree hashing).
pub fn config_block(output_bits: u64) -> [u8; BLOCK_BYTES] {
    let mut block = [0u8; BLOCK_BYTES];
    block[0..8].copy_from_slice(&SCHEMA_ID.to_le_bytes());
    block[8..16].copy_from_slice(&output_bits.to_le_bytes());
    block
}

/// On-disk form of [`Config`]: every field is an optional hex string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

fn decode_field(name: &str, value: Option<String>) -> Result<Vec<u8>> {
    match value {
        None => Ok(Vec::new()),
        Some(s) => hex::decode(s.trim())
            .map_err(|e| SkeinError::InvalidConfig(format!("{}: {}", name, e))),
    }
}

fn encode_field(value: &[u8]) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(hex::encode(value))
    }
}

impl TryFrom<ConfigFile> for Config {
    type Error = SkeinError;

    fn try_from(file: ConfigFile) -> Result<Self> {
        Ok(Self {
            key: decode_field("key", file.key)?,
            personal: decode_field("personal", file.personal)?,
            public_key: decode_field("public_key", file.public_key)?,
            key_id: decode_field("key_id", file.key_id)?,
            nonce: decode_field("nonce", file.nonce)?,
        })
    }
}

impl From<&Config> for ConfigFile {
    fn from(config: &Config) -> Self {
        Self {
            key: encode_field(&config.key),
            personal: encode_field(&config.personal),
            public_key: encode_field(&config.public_key),
            key_id: encode_field(&config.key_id),
            nonce: encode_field(&config.nonce),
        }
    }
}
