//! CLI structure and argument parsing
//!
//! Flag names keep the operator-facing camelCase spelling. Value checks
//! (network names, required `--blocks`) are left to the option schema so that
//! every invocation path reports the same diagnostics.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{commands, defaults};
use crate::options::RawFlags;

/// Snapshot restore and verification for ledger nodes
#[derive(Debug, Parser)]
#[command(name = "snapshot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = defaults::CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "snapshot:restore", about = commands::RESTORE_DESCRIPTION)]
    Restore(RestoreArgs),

    #[command(name = "snapshot:verify", about = commands::VERIFY_DESCRIPTION)]
    Verify(VerifyArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// The name of the token.
    #[arg(long, default_value = defaults::TOKEN)]
    pub token: String,

    /// The name of the network.
    #[arg(long)]
    pub network: Option<String>,

    /// Skip gzip compression.
    #[arg(long = "skipCompression")]
    pub skip_compression: bool,

    /// Dumps generated queries and settings to console.
    #[arg(long)]
    pub trace: bool,

    /// Verify signatures of specified snapshot.
    #[arg(long = "verifySignatures")]
    pub verify_signatures: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RestoreArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Blocks to import, correlates to folder name.
    #[arg(long)]
    pub blocks: Option<String>,

    /// Empty all tables before running import.
    #[arg(long)]
    pub truncate: bool,

    /// Skip revert to current round.
    #[arg(long = "skipRestartRound")]
    pub skip_restart_round: bool,
}

#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Blocks to verify, correlates to folder name.
    #[arg(long)]
    pub blocks: Option<String>,
}

impl CommonArgs {
    fn raw_flags(&self) -> RawFlags {
        RawFlags {
            token: Some(self.token.clone()),
            network: self.network.clone(),
            skip_compression: Some(self.skip_compression),
            trace: Some(self.trace),
            verify_signatures: Some(self.verify_signatures),
            ..Default::default()
        }
    }
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Restore(_) => commands::RESTORE,
            Commands::Verify(_) => commands::VERIFY,
        }
    }

    pub fn trace(&self) -> bool {
        match self {
            Commands::Restore(args) => args.common.trace,
            Commands::Verify(args) => args.common.trace,
        }
    }

    /// Command name plus the flags in schema form
    pub fn into_invocation(self) -> (&'static str, RawFlags) {
        let name = self.name();
        let raw = match self {
            Commands::Restore(args) => RawFlags {
                blocks: args.blocks,
                truncate: Some(args.truncate),
                skip_restart_round: Some(args.skip_restart_round),
                ..args.common.raw_flags()
            },
            Commands::Verify(args) => RawFlags {
                blocks: args.blocks,
                ..args.common.raw_flags()
            },
        };
        (name, raw)
    }
}
