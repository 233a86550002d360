//! Common test data and constants

use snapshot::progress::{Entity, Phase, ProgressEvent};
use snapshot::RawFlags;

/// Common test network names
pub mod networks {
    pub const MAINNET: &str = "mainnet";
    pub const DEVNET: &str = "devnet";
    pub const UNKNOWN: &str = "moonnet";
}

/// Storage targets of test nodes
pub mod nodes {
    pub const NODE_1: &str = "127.0.0.1_8745";
    pub const NODE_2: &str = "10.0.0.2_8745";
}

/// Common blocks selectors
pub mod blocks {
    pub const DATED: &str = "2020-01-01";
    pub const RANGE: &str = "1-52000";
}

/// Readiness facts reported by a fake application
#[derive(Debug, Clone, Copy)]
pub struct ReadinessFacts {
    pub booted: bool,
    pub database: bool,
    pub snapshot: bool,
}

impl ReadinessFacts {
    pub fn all_ready() -> Self {
        Self {
            booted: true,
            database: true,
            snapshot: true,
        }
    }
}

/// `count` block-writing events with a known total
pub fn block_events(count: u64) -> Vec<ProgressEvent> {
    (1..=count)
        .map(|processed| ProgressEvent::new(Entity::Blocks, Phase::Writing, processed, Some(count)))
        .collect()
}

pub fn restore_flags(network: &str, blocks: Option<&str>) -> RawFlags {
    RawFlags {
        network: Some(network.to_string()),
        blocks: blocks.map(str::to_string),
        ..Default::default()
    }
}

pub fn verify_flags(network: &str, blocks: Option<&str>) -> RawFlags {
    RawFlags {
        network: Some(network.to_string()),
        blocks: blocks.map(str::to_string),
        verify_signatures: Some(true),
        ..Default::default()
    }
}
