//! Progress reporting between the snapshot engine and the operator
//!
//! # Channel contract
//!
//! - The engine owns the only [`ProgressSender`] for the duration of one call
//! - Events are delivered in emission order to a single [`ProgressReceiver`]
//! - Sending never waits on the observer (unbounded channel)
//! - The channel closes when the engine drops the sender, i.e. when the call returns
//! - The terminal outcome is the call's own result, never an event

pub mod renderer;
pub mod surface;

pub use renderer::{render_line, OperationOutcome, ProgressRenderer};
pub use surface::{ComponentFactory, ConsoleComponents, DisplaySurface, SpinnerSurface};

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;
use tracing::debug;

/// Kind of record the engine is processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Entity {
    Blocks,
    Transactions,
    Rounds,
    Wallets,
    Other(String),
}

impl From<String> for Entity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "blocks" => Entity::Blocks,
            "transactions" => Entity::Transactions,
            "rounds" => Entity::Rounds,
            "wallets" => Entity::Wallets,
            _ => Entity::Other(value),
        }
    }
}

impl From<Entity> for String {
    fn from(entity: Entity) -> Self {
        entity.to_string()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Blocks => f.write_str("blocks"),
            Entity::Transactions => f.write_str("transactions"),
            Entity::Rounds => f.write_str("rounds"),
            Entity::Wallets => f.write_str("wallets"),
            Entity::Other(name) => f.write_str(name),
        }
    }
}

/// Stage of the operation the event belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    Reading,
    Decompressing,
    Writing,
    Verifying,
    Truncating,
    Other(String),
}

impl From<String> for Phase {
    fn from(value: String) -> Self {
        match value.as_str() {
            "reading" => Phase::Reading,
            "decompressing" => Phase::Decompressing,
            "writing" => Phase::Writing,
            "verifying" => Phase::Verifying,
            "truncating" => Phase::Truncating,
            _ => Phase::Other(value),
        }
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        phase.to_string()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Reading => f.write_str("reading"),
            Phase::Decompressing => f.write_str("decompressing"),
            Phase::Writing => f.write_str("writing"),
            Phase::Verifying => f.write_str("verifying"),
            Phase::Truncating => f.write_str("truncating"),
            Phase::Other(name) => f.write_str(name),
        }
    }
}

/// One incremental status update from the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub entity: Entity,
    pub processed: u64,
    /// Unknown while streaming
    #[serde(default)]
    pub total: Option<u64>,
    pub phase: Phase,
}

impl ProgressEvent {
    pub fn new(entity: Entity, phase: Phase, processed: u64, total: Option<u64>) -> Self {
        Self {
            entity,
            processed,
            total,
            phase,
        }
    }
}

/// Engine side of the progress channel. Deliberately not `Clone`.
#[derive(Debug)]
pub struct ProgressSender {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ProgressSender {
    pub fn emit(&self, event: ProgressEvent) {
        if self.tx.send(event).is_err() {
            debug!("Progress observer is gone, dropping event");
        }
    }
}

/// Observer side of the progress channel
#[derive(Debug)]
pub struct ProgressReceiver {
    rx: mpsc::UnboundedReceiver<ProgressEvent>,
}

impl ProgressReceiver {
    /// Next event, or `None` once the engine call has returned and all events were drained
    pub async fn next(&mut self) -> Option<ProgressEvent> {
        self.rx.recv().await
    }
}

pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender { tx }, ProgressReceiver { rx })
}
