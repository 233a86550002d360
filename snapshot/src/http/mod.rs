// File: snapshot/src/http/mod.rs
//! HTTP adapter for the node agent
//!
//! The snapshot engine and the application bootstrap run inside an agent on
//! the node host. This module implements the collaborator traits on top of the
//! agent's HTTP API.
//!
//! # Architecture
//!
//! ```text
//! CLI → POST /app/bootstrap      → Agent (port 8745)
//!  ↓                                   ↓
//! Gate ← booted + bound services ←─────┘
//!  ↓
//! CLI → POST /snapshot/{restore,verify} → job_id
//!  ↓
//! Poll GET /operation/status/{job_id} → progress → renderer
//!                                     → Completed / Failed
//! ```

pub mod agent_client;
pub mod application;
pub mod snapshot_engine;

pub use agent_client::AgentClient;
pub use application::{AgentApplication, AgentBootstrap};
pub use snapshot_engine::AgentSnapshotService;
