//! This module provides reusable test utilities:
//! - Fake bootstrap, application and snapshot engine collaborators
//! - A recording display surface
//! - Mock HTTP node agent
//! - Context builders with temporary lock directories
//! - Common test data

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fake_app;
pub mod fake_engine;
pub mod mock_agent;
pub mod recording_surface;
pub mod test_context;
pub mod test_data;

// Re-export commonly used items
pub use fake_app::{FakeApplication, FakeBootstrap};
pub use fake_engine::{EngineCall, ScriptedEngine};
pub use mock_agent::{progress_json, MockAgentServer};
pub use recording_surface::{RecordingComponents, SurfaceUpdate};
pub use test_context::TestContext;
pub use test_data::*;
