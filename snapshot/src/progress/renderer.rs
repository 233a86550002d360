//! Operator-facing rendering of engine progress
//!
//! The renderer is a pure observer: it keeps the current line and a count of
//! events seen, and does only synchronous display updates per event.

use super::surface::DisplaySurface;
use super::{ProgressEvent, ProgressReceiver};

const SUCCESS_GLYPH: &str = "✔";
const FAILURE_GLYPH: &str = "✖";

/// Terminal outcome of the observed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Succeeded,
    Failed(String),
}

pub fn render_line(event: &ProgressEvent) -> String {
    match event.total {
        Some(total) => {
            let percent = if total == 0 {
                100
            } else {
                // Widened so totals near u64::MAX cannot overflow
                (u128::from(event.processed.min(total)) * 100) / u128::from(total)
            };
            format!(
                "[{}] processing {}: {}/{} ({}%)",
                event.phase, event.entity, event.processed, total, percent
            )
        }
        None => format!(
            "[{}] processing {}: {} (total unknown)",
            event.phase, event.entity, event.processed
        ),
    }
}

pub struct ProgressRenderer {
    surface: Box<dyn DisplaySurface>,
    current_line: Option<String>,
    observed: usize,
}

impl ProgressRenderer {
    pub fn new(surface: Box<dyn DisplaySurface>) -> Self {
        Self {
            surface,
            current_line: None,
            observed: 0,
        }
    }

    pub fn on_event(&mut self, event: &ProgressEvent) {
        let line = render_line(event);
        let position = event.total.map(|total| (event.processed, total));
        self.surface.update(&line, position);
        self.current_line = Some(line);
        self.observed += 1;
    }

    /// Drain the channel until the engine call returns. Yields the number of events seen.
    pub async fn observe(&mut self, mut receiver: ProgressReceiver) -> usize {
        while let Some(event) = receiver.next().await {
            self.on_event(&event);
        }
        self.observed
    }

    pub fn current_line(&self) -> Option<&str> {
        self.current_line.as_deref()
    }

    pub fn finish(mut self, operation: &str, outcome: &OperationOutcome) {
        match outcome {
            OperationOutcome::Succeeded => {
                let line = format!("{} Snapshot {} completed", SUCCESS_GLYPH, operation);
                self.surface.succeed(&line);
            }
            OperationOutcome::Failed(reason) => {
                let line = format!("{} Snapshot {} failed: {}", FAILURE_GLYPH, operation, reason);
                self.surface.fail(&line);
            }
        }
    }
}
