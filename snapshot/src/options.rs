//! Option schema for the snapshot commands
//!
//! Turns raw operator input into immutable, normalized option values. Pure:
//! no I/O, no logging. Every failure names the offending flag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{commands, defaults, networks};
use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Devnet,
    Testnet,
    Unitnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => networks::MAINNET,
            Network::Devnet => networks::DEVNET,
            Network::Testnet => networks::TESTNET,
            Network::Unitnet => networks::UNITNET,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            networks::MAINNET => Ok(Network::Mainnet),
            networks::DEVNET => Ok(Network::Devnet),
            networks::TESTNET => Ok(Network::Testnet),
            networks::UNITNET => Ok(Network::Unitnet),
            _ => Err(ValidationError::InvalidValue {
                flag: "network".to_string(),
                value: value.to_string(),
                reason: format!("expected one of {}", networks::ALL.join(", ")),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    String,
    Boolean,
}

/// Declarative description of one accepted flag
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FlagKind,
    pub required: bool,
    pub default: Option<&'static str>,
}

const TOKEN_FLAG: FlagSpec = FlagSpec {
    name: "token",
    description: "The name of the token.",
    kind: FlagKind::String,
    required: false,
    default: Some(defaults::TOKEN),
};

const NETWORK_FLAG: FlagSpec = FlagSpec {
    name: "network",
    description: "The name of the network.",
    kind: FlagKind::String,
    required: false,
    default: None,
};

const SKIP_COMPRESSION_FLAG: FlagSpec = FlagSpec {
    name: "skipCompression",
    description: "Skip gzip compression.",
    kind: FlagKind::Boolean,
    required: false,
    default: None,
};

const TRACE_FLAG: FlagSpec = FlagSpec {
    name: "trace",
    description: "Dumps generated queries and settings to console.",
    kind: FlagKind::Boolean,
    required: false,
    default: None,
};

const VERIFY_SIGNATURES_FLAG: FlagSpec = FlagSpec {
    name: "verifySignatures",
    description: "Verify signatures of specified snapshot.",
    kind: FlagKind::Boolean,
    required: false,
    default: None,
};

pub const RESTORE_FLAGS: &[FlagSpec] = &[
    TOKEN_FLAG,
    NETWORK_FLAG,
    SKIP_COMPRESSION_FLAG,
    TRACE_FLAG,
    FlagSpec {
        name: "blocks",
        description: "Blocks to import, correlates to folder name.",
        kind: FlagKind::String,
        required: false,
        default: None,
    },
    FlagSpec {
        name: "truncate",
        description: "Empty all tables before running import.",
        kind: FlagKind::Boolean,
        required: false,
        default: None,
    },
    FlagSpec {
        name: "skipRestartRound",
        description: "Skip revert to current round.",
        kind: FlagKind::Boolean,
        required: false,
        default: None,
    },
    VERIFY_SIGNATURES_FLAG,
];

pub const VERIFY_FLAGS: &[FlagSpec] = &[
    TOKEN_FLAG,
    NETWORK_FLAG,
    SKIP_COMPRESSION_FLAG,
    TRACE_FLAG,
    FlagSpec {
        name: "blocks",
        description: "Blocks to verify, correlates to folder name.",
        kind: FlagKind::String,
        required: true,
        default: None,
    },
    VERIFY_SIGNATURES_FLAG,
];

/// Operator input as supplied, before validation. `None` means "flag absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFlags {
    pub token: Option<String>,
    pub network: Option<String>,
    pub skip_compression: Option<bool>,
    pub trace: Option<bool>,
    pub blocks: Option<String>,
    pub truncate: Option<bool>,
    pub skip_restart_round: Option<bool>,
    pub verify_signatures: Option<bool>,
}

impl RawFlags {
    /// Names of the flags that were supplied, as the operator spells them
    pub fn supplied(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.token.is_some() {
            names.push("token");
        }
        if self.network.is_some() {
            names.push("network");
        }
        if self.skip_compression.is_some() {
            names.push("skipCompression");
        }
        if self.trace.is_some() {
            names.push("trace");
        }
        if self.blocks.is_some() {
            names.push("blocks");
        }
        if self.truncate.is_some() {
            names.push("truncate");
        }
        if self.skip_restart_round.is_some() {
            names.push("skipRestartRound");
        }
        if self.verify_signatures.is_some() {
            names.push("verifySignatures");
        }
        names
    }
}

/// Options shared by restore and verify
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonOptions {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    pub skip_compression: bool,
    pub trace: bool,
    pub verify_signatures: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOptions {
    #[serde(flatten)]
    pub common: CommonOptions,
    /// Absent means the most recent snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<String>,
    pub truncate: bool,
    pub skip_restart_round: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOptions {
    #[serde(flatten)]
    pub common: CommonOptions,
    pub blocks: String,
}

/// Normalized options of one invocation, tagged by command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandOptions {
    Restore(RestoreOptions),
    Verify(VerifyOptions),
}

impl CommandOptions {
    pub fn command(&self) -> &'static str {
        match self {
            CommandOptions::Restore(_) => commands::RESTORE,
            CommandOptions::Verify(_) => commands::VERIFY,
        }
    }

    pub fn common(&self) -> &CommonOptions {
        match self {
            CommandOptions::Restore(options) => &options.common,
            CommandOptions::Verify(options) => &options.common,
        }
    }
}

fn reject_unsupported(
    raw: &RawFlags,
    accepted: &[FlagSpec],
    command: &str,
) -> Result<(), ValidationError> {
    for flag in raw.supplied() {
        if !accepted.iter().any(|spec| spec.name == flag) {
            return Err(ValidationError::UnsupportedFlag {
                flag: flag.to_string(),
                command: command.to_string(),
            });
        }
    }
    Ok(())
}

fn normalize_blocks(blocks: Option<&String>) -> Option<String> {
    blocks
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn validate_common(raw: &RawFlags) -> Result<CommonOptions, ValidationError> {
    let token = match raw.token.as_deref().map(str::trim) {
        None => defaults::TOKEN.to_string(),
        Some("") => {
            return Err(ValidationError::InvalidValue {
                flag: "token".to_string(),
                value: String::new(),
                reason: "token name must not be empty".to_string(),
            })
        }
        Some(token) => token.to_string(),
    };

    let network = raw
        .network
        .as_deref()
        .map(str::parse::<Network>)
        .transpose()?;

    Ok(CommonOptions {
        token,
        network,
        skip_compression: raw.skip_compression.unwrap_or(false),
        trace: raw.trace.unwrap_or(false),
        verify_signatures: raw.verify_signatures.unwrap_or(false),
    })
}

pub fn validate_restore(raw: &RawFlags) -> Result<RestoreOptions, ValidationError> {
    reject_unsupported(raw, RESTORE_FLAGS, commands::RESTORE)?;
    let common = validate_common(raw)?;

    Ok(RestoreOptions {
        common,
        blocks: normalize_blocks(raw.blocks.as_ref()),
        truncate: raw.truncate.unwrap_or(false),
        skip_restart_round: raw.skip_restart_round.unwrap_or(false),
    })
}

/// Verify requires a blocks selector; its absence is reported before anything else runs.
pub fn validate_verify(raw: &RawFlags) -> Result<VerifyOptions, ValidationError> {
    let blocks =
        normalize_blocks(raw.blocks.as_ref()).ok_or_else(|| ValidationError::MissingFlag {
            flag: "blocks".to_string(),
        })?;

    reject_unsupported(raw, VERIFY_FLAGS, commands::VERIFY)?;
    let common = validate_common(raw)?;

    Ok(VerifyOptions { common, blocks })
}
