//! Command context wired to fakes and a temporary lock directory

use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use super::fake_app::{FakeApplication, FakeBootstrap};
use super::fake_engine::ScriptedEngine;
use super::recording_surface::RecordingComponents;
use super::test_data::{nodes, ReadinessFacts};
use snapshot::{CommandContext, TargetLock};

pub struct TestContext {
    // Keeps the lock directory alive for the duration of the test
    _lock_dir: Option<TempDir>,
    pub context: CommandContext,
    pub bootstrap: Arc<FakeBootstrap>,
    pub engine: Arc<ScriptedEngine>,
    pub components: Arc<RecordingComponents>,
}

impl TestContext {
    pub fn new(facts: ReadinessFacts, engine: ScriptedEngine) -> Self {
        let lock_dir = TempDir::new().expect("Failed to create lock dir");
        let mut ctx = Self::with_lock_dir(lock_dir.path(), facts, engine);
        ctx._lock_dir = Some(lock_dir);
        ctx
    }

    /// Context whose lock directory is owned by the caller (for concurrency tests)
    pub fn with_lock_dir(lock_dir: &Path, facts: ReadinessFacts, engine: ScriptedEngine) -> Self {
        Self::on_node(lock_dir, nodes::NODE_1, facts, engine)
    }

    /// Like `with_lock_dir`, against the storage of a specific node
    pub fn on_node(
        lock_dir: &Path,
        storage_target: &str,
        facts: ReadinessFacts,
        engine: ScriptedEngine,
    ) -> Self {
        let engine = Arc::new(engine);
        let bootstrap = Arc::new(FakeBootstrap::new(FakeApplication::new(
            facts,
            engine.clone(),
        )));
        Self::assemble(lock_dir, storage_target, bootstrap, engine)
    }

    pub fn with_failing_bootstrap(reason: &str) -> Self {
        let lock_dir = TempDir::new().expect("Failed to create lock dir");
        let mut ctx = Self::assemble(
            lock_dir.path(),
            nodes::NODE_1,
            Arc::new(FakeBootstrap::failing(reason)),
            Arc::new(ScriptedEngine::succeeding(Vec::new())),
        );
        ctx._lock_dir = Some(lock_dir);
        ctx
    }

    fn assemble(
        lock_dir: &Path,
        storage_target: &str,
        bootstrap: Arc<FakeBootstrap>,
        engine: Arc<ScriptedEngine>,
    ) -> Self {
        let components = Arc::new(RecordingComponents::default());
        let context = CommandContext::new(
            bootstrap.clone(),
            components.clone(),
            TargetLock::new(lock_dir),
            storage_target,
        );

        Self {
            _lock_dir: None,
            context,
            bootstrap,
            engine,
            components,
        }
    }
}
