//! Restore and verify command orchestration
//!
//! Both commands share one state machine and differ only in the options they
//! accept, the lock mode they take and the engine call they make.
//!
//! # Flow
//!
//! 1. Validate options (verify's missing `--blocks` is reported here, before anything else)
//! 2. Take the node's storage target lock (exclusive for restore, shared for verify)
//! 3. Bootstrap the application with the options tagged as a snapshot process
//! 4. Readiness gate: booted, then database bound, then snapshot bound
//! 5. Attach a progress renderer to the component factory's spinner
//! 6. Invoke the engine and render its progress until the call returns
//! 7. Finish the display and report the terminal outcome

use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::app::{ApplicationConfig, ApplicationContext, Bootstrap};
use crate::constants::commands;
use crate::engine::SnapshotService;
use crate::errors::{BootstrapError, EngineError, ReadinessError, SnapshotError};
use crate::lock::{LockMode, TargetLock};
use crate::options::{validate_restore, validate_verify, CommandOptions, RawFlags};
use crate::progress::{
    progress_channel, ComponentFactory, OperationOutcome, ProgressRenderer, ProgressSender,
};
use crate::readiness::{check_readiness, Readiness};

/// Collaborators of one command invocation, passed explicitly
///
/// `storage_target` names the node storage the bootstrap collaborator writes
/// to. Invocations against the same node contend on it regardless of
/// `--network`.
#[derive(Clone)]
pub struct CommandContext {
    bootstrap: Arc<dyn Bootstrap>,
    components: Arc<dyn ComponentFactory>,
    locks: TargetLock,
    storage_target: String,
}

impl CommandContext {
    pub fn new(
        bootstrap: Arc<dyn Bootstrap>,
        components: Arc<dyn ComponentFactory>,
        locks: TargetLock,
        storage_target: impl Into<String>,
    ) -> Self {
        Self {
            bootstrap,
            components,
            locks,
            storage_target: storage_target.into(),
        }
    }

    pub fn storage_target(&self) -> &str {
        &self.storage_target
    }
}

fn operation_name(options: &CommandOptions) -> &'static str {
    match options {
        CommandOptions::Restore(_) => "restore",
        CommandOptions::Verify(_) => "verify",
    }
}

fn lock_mode(options: &CommandOptions) -> LockMode {
    match options {
        CommandOptions::Restore(_) => LockMode::Exclusive,
        CommandOptions::Verify(_) => LockMode::Shared,
    }
}

async fn invoke_engine(
    engine: &dyn SnapshotService,
    options: &CommandOptions,
    progress: ProgressSender,
) -> anyhow::Result<()> {
    match options {
        CommandOptions::Restore(restore) => engine.restore(restore, progress).await,
        CommandOptions::Verify(verify) => engine.verify(verify, progress).await,
    }
}

#[instrument(skip_all, fields(command = commands::RESTORE))]
pub async fn run_restore(ctx: &CommandContext, raw: RawFlags) -> Result<(), SnapshotError> {
    let options = validate_restore(&raw)?;
    info!("Running restore method from CLI");
    execute(ctx, CommandOptions::Restore(options)).await
}

#[instrument(skip_all, fields(command = commands::VERIFY))]
pub async fn run_verify(ctx: &CommandContext, raw: RawFlags) -> Result<(), SnapshotError> {
    let options = validate_verify(&raw)?;
    info!("Running verify method from CLI");
    execute(ctx, CommandOptions::Verify(options)).await
}

async fn execute(ctx: &CommandContext, options: CommandOptions) -> Result<(), SnapshotError> {
    let command = options.command();
    let operation = operation_name(&options);
    let target = ctx.storage_target();

    let _guard = ctx
        .locks
        .try_acquire(target, lock_mode(&options), command)?;

    let app = ctx
        .bootstrap
        .build_application(ApplicationConfig::for_command(options.clone()))
        .await
        .map_err(|e| BootstrapError::BuildFailed {
            reason: format!("{:#}", e),
        })?;

    let engine = gate(app.as_ref())?;

    let mut renderer = ProgressRenderer::new(ctx.components.spinner());
    let (sender, receiver) = progress_channel();

    // The engine future owns the sender, so the channel closes exactly when the call returns
    let (result, observed) = tokio::join!(
        invoke_engine(engine.as_ref(), &options, sender),
        renderer.observe(receiver)
    );

    match result {
        Ok(()) => {
            renderer.finish(operation, &OperationOutcome::Succeeded);
            info!(
                "Finish running {} method from CLI ({} progress updates)",
                operation, observed
            );
            Ok(())
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            renderer.finish(operation, &OperationOutcome::Failed(reason.clone()));
            error!(
                "Snapshot {} on {} failed after {} progress updates",
                operation, target, observed
            );
            Err(EngineError::OperationFailed {
                operation: operation.to_string(),
                reason,
            }
            .into())
        }
    }
}

fn gate(app: &dyn ApplicationContext) -> Result<Arc<dyn SnapshotService>, ReadinessError> {
    if let Readiness::NotReady(reason) = check_readiness(app) {
        warn!("Readiness check failed: {}", reason.failed_check());
        return Err(reason);
    }

    app.snapshot_service()
        .ok_or(ReadinessError::SnapshotNotBound)
}
