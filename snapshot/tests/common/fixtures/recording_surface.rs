//! Display surface that records what the renderer shows

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use snapshot::progress::{ComponentFactory, DisplaySurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceUpdate {
    Update {
        line: String,
        position: Option<(u64, u64)>,
    },
    Succeed(String),
    Fail(String),
}

struct RecordingSurface {
    log: Arc<Mutex<Vec<SurfaceUpdate>>>,
}

impl DisplaySurface for RecordingSurface {
    fn update(&mut self, line: &str, position: Option<(u64, u64)>) {
        self.log.lock().unwrap().push(SurfaceUpdate::Update {
            line: line.to_string(),
            position,
        });
    }

    fn succeed(&mut self, line: &str) {
        self.log
            .lock()
            .unwrap()
            .push(SurfaceUpdate::Succeed(line.to_string()));
    }

    fn fail(&mut self, line: &str) {
        self.log
            .lock()
            .unwrap()
            .push(SurfaceUpdate::Fail(line.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingComponents {
    log: Arc<Mutex<Vec<SurfaceUpdate>>>,
    spinners: AtomicUsize,
}

impl RecordingComponents {
    pub fn updates(&self) -> Vec<SurfaceUpdate> {
        self.log.lock().unwrap().clone()
    }

    pub fn progress_lines(&self) -> Vec<String> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                SurfaceUpdate::Update { line, .. } => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn spinners_created(&self) -> usize {
        self.spinners.load(Ordering::SeqCst)
    }
}

impl ComponentFactory for RecordingComponents {
    fn spinner(&self) -> Box<dyn DisplaySurface> {
        self.spinners.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordingSurface {
            log: self.log.clone(),
        })
    }
}
