//! Contract the snapshot engine must satisfy
//!
//! The engine itself (file format, decompression, signature checks, truncation
//! and round rollback) lives behind this trait. Implementations report progress
//! through the [`ProgressSender`] they are handed and must drop it when the call
//! returns, which closes the channel for the observer.

use anyhow::Result;
use async_trait::async_trait;

use crate::options::{RestoreOptions, VerifyOptions};
use crate::progress::ProgressSender;

#[async_trait]
pub trait SnapshotService: Send + Sync {
    /// Load a snapshot into the storage target
    async fn restore(&self, options: &RestoreOptions, progress: ProgressSender) -> Result<()>;

    /// Check a snapshot without mutating storage
    async fn verify(&self, options: &VerifyOptions, progress: ProgressSender) -> Result<()>;
}
