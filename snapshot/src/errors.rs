//! Custom error types for the snapshot commands
//!
//! Every failure is terminal for the current invocation. Each variant carries
//! enough context (which flag, which readiness check, which lock holder) to be
//! actionable without inspecting internals.

use std::fmt;

use chrono::Utc;

use crate::lock::LockHolder;

/// Main error type for a snapshot command invocation
#[derive(Debug)]
pub enum SnapshotError {
    /// Malformed or missing operator input
    Validation(ValidationError),

    /// Configuration file errors
    Config(ConfigError),

    /// Storage target lock errors
    Lock(LockError),

    /// Application bootstrap errors
    Bootstrap(BootstrapError),

    /// A readiness precondition does not hold
    Readiness(ReadinessError),

    /// The snapshot engine rejected the operation
    Engine(EngineError),

    /// Other errors with context
    Other(String),
}

/// Option validation error variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required flag was not supplied
    MissingFlag { flag: String },

    /// A flag carries a value outside its domain
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },

    /// A flag not accepted by the command was supplied
    UnsupportedFlag { flag: String, command: String },

    /// No command with this name is registered
    UnknownCommand { name: String },
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    LoadFailed { path: String, reason: String },

    /// Configuration parsing error
    ParseError { path: String, reason: String },
}

/// Storage target lock error variants
#[derive(Debug)]
pub enum LockError {
    /// Another invocation holds the target
    Busy {
        target: String,
        command: String,
        holder: Option<LockHolder>,
    },

    /// The lock file could not be opened or written
    Io { path: String, reason: String },
}

/// Bootstrap error variants
#[derive(Debug)]
pub enum BootstrapError {
    /// The application could not be built
    BuildFailed { reason: String },
}

/// Readiness failures, one per check, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessError {
    AppNotBooted,
    DatabaseNotBound,
    SnapshotNotBound,
}

/// Snapshot engine error variants
#[derive(Debug)]
pub enum EngineError {
    /// Restore or verify call rejected
    OperationFailed { operation: String, reason: String },
}

impl SnapshotError {
    /// Short category name, used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            SnapshotError::Validation(_) => "validation",
            SnapshotError::Config(_) => "config",
            SnapshotError::Lock(_) => "lock",
            SnapshotError::Bootstrap(_) => "bootstrap",
            SnapshotError::Readiness(_) => "readiness",
            SnapshotError::Engine(_) => "engine",
            SnapshotError::Other(_) => "other",
        }
    }
}

impl ReadinessError {
    /// The readiness fact that did not hold
    pub fn failed_check(&self) -> &'static str {
        match self {
            ReadinessError::AppNotBooted => "application finished boot sequence",
            ReadinessError::DatabaseNotBound => "storage service is registered",
            ReadinessError::SnapshotNotBound => "snapshot service is registered",
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn elapsed_since(started_at: chrono::DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(started_at);
    if duration.num_hours() > 0 {
        format!("{}h {}m", duration.num_hours(), duration.num_minutes() % 60)
    } else {
        format!("{}m", duration.num_minutes())
    }
}

// Leaf messages are the operator-facing diagnostics, so the top-level enum
// does not add a prefix.
impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Validation(e) => write!(f, "{}", e),
            SnapshotError::Config(e) => write!(f, "{}", e),
            SnapshotError::Lock(e) => write!(f, "{}", e),
            SnapshotError::Bootstrap(e) => write!(f, "{}", e),
            SnapshotError::Readiness(e) => write!(f, "{}", e),
            SnapshotError::Engine(e) => write!(f, "{}", e),
            SnapshotError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFlag { flag } => {
                write!(f, "{} flag is missing", capitalize(flag))
            }
            ValidationError::InvalidValue {
                flag,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for '{}': {}", value, flag, reason)
            }
            ValidationError::UnsupportedFlag { flag, command } => {
                write!(f, "Flag '{}' is not accepted by {}", flag, command)
            }
            ValidationError::UnknownCommand { name } => {
                write!(f, "Unknown command: {}", name)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::ParseError { path, reason } => {
                write!(f, "Failed to parse config '{}': {}", path, reason)
            }
        }
    }
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Busy {
                target,
                command,
                holder: Some(holder),
            } => {
                write!(
                    f,
                    "Storage target {} is currently busy with '{}' (pid {}, started {} ago). Wait for it to finish before running {}.",
                    target,
                    holder.command,
                    holder.pid,
                    elapsed_since(holder.started_at),
                    command
                )
            }
            LockError::Busy {
                target,
                command,
                holder: None,
            } => {
                write!(
                    f,
                    "Storage target {} is currently in use by running snapshot verifications. Wait for them to finish before running {}.",
                    target, command
                )
            }
            LockError::Io { path, reason } => {
                write!(f, "Failed to use lock file '{}': {}", path, reason)
            }
        }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::BuildFailed { reason } => {
                write!(f, "Failed to build application: {}", reason)
            }
        }
    }
}

impl fmt::Display for ReadinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessError::AppNotBooted => write!(f, "App is not booted."),
            ReadinessError::DatabaseNotBound => write!(f, "Database service is not initialized."),
            ReadinessError::SnapshotNotBound => write!(f, "Snapshot service is not initialized."),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::OperationFailed { operation, reason } => {
                write!(f, "Snapshot {} failed: {}", operation, reason)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
impl std::error::Error for ValidationError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for LockError {}
impl std::error::Error for BootstrapError {}
impl std::error::Error for ReadinessError {}
impl std::error::Error for EngineError {}

impl From<anyhow::Error> for SnapshotError {
    fn from(err: anyhow::Error) -> Self {
        SnapshotError::Other(format!("{:#}", err))
    }
}

impl From<ValidationError> for SnapshotError {
    fn from(err: ValidationError) -> Self {
        SnapshotError::Validation(err)
    }
}

impl From<ConfigError> for SnapshotError {
    fn from(err: ConfigError) -> Self {
        SnapshotError::Config(err)
    }
}

impl From<LockError> for SnapshotError {
    fn from(err: LockError) -> Self {
        SnapshotError::Lock(err)
    }
}

impl From<BootstrapError> for SnapshotError {
    fn from(err: BootstrapError) -> Self {
        SnapshotError::Bootstrap(err)
    }
}

impl From<ReadinessError> for SnapshotError {
    fn from(err: ReadinessError) -> Self {
        SnapshotError::Readiness(err)
    }
}

impl From<EngineError> for SnapshotError {
    fn from(err: EngineError) -> Self {
        SnapshotError::Engine(err)
    }
}
