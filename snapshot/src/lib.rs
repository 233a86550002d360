pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod http;
pub mod lock;
pub mod options;
pub mod orchestrator;
pub mod progress;
pub mod readiness;

// Re-export commonly used types
pub use app::{ApplicationConfig, ApplicationContext, Bootstrap, ServiceId};
pub use cli::Cli;
pub use commands::CommandTable;
pub use config::{Config, ConfigManager};
pub use engine::SnapshotService;
pub use errors::SnapshotError;
pub use lock::{LockMode, TargetLock};
pub use options::{CommandOptions, RawFlags, RestoreOptions, VerifyOptions};
pub use orchestrator::{run_restore, run_verify, CommandContext};
pub use progress::{ProgressEvent, ProgressRenderer};
pub use readiness::{check_readiness, Readiness};
