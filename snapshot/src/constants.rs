//! Application-wide constants for command names, defaults and agent timing values
//!
//! Organized by category so the command table, the option schema and the
//! node-agent adapter share a single source of truth.

/// Command names and descriptions
pub mod commands {
    /// Restore command signature
    pub const RESTORE: &str = "snapshot:restore";

    /// Verify command signature
    pub const VERIFY: &str = "snapshot:verify";

    pub const RESTORE_DESCRIPTION: &str = "Import data from specified snapshot.";

    pub const VERIFY_DESCRIPTION: &str = "Check validity of specified snapshot.";

    /// Process type marker handed to the bootstrap collaborator
    pub const PROCESS_TYPE: &str = "snapshot";
}

/// Default option and configuration values
pub mod defaults {
    /// Token used when `--token` is absent
    pub const TOKEN: &str = "ark";

    /// Configuration file read when `--config` is absent
    pub const CONFIG_PATH: &str = "config/snapshot.toml";

    /// Directory holding the storage target lock files
    pub const LOCK_DIR: &str = "data/locks";
}

/// Statically known network identifiers
pub mod networks {
    pub const MAINNET: &str = "mainnet";
    pub const DEVNET: &str = "devnet";
    pub const TESTNET: &str = "testnet";
    pub const UNITNET: &str = "unitnet";

    pub const ALL: [&str; 4] = [MAINNET, DEVNET, TESTNET, UNITNET];
}

/// Node agent connection constants
pub mod agent {
    /// Default host of the node agent
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default port for agent HTTP server
    pub const DEFAULT_PORT: u16 = 8745;

    /// Interval between polling for job status
    pub const POLL_INTERVAL_MS: u64 = 10_000;

    /// Consecutive failed polls tolerated before a job is considered lost
    pub const MAX_CONSECUTIVE_FAILURES: u32 = 5;

    /// Timeout for a single HTTP request to the agent
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;
}
