//! Readiness gate run before any engine call
//!
//! Checks are evaluated in a fixed order and the first failing one is
//! reported: boot state comes before service binding, and the storage service
//! comes before the snapshot service that depends on it.

use tracing::debug;

use crate::app::{ApplicationContext, ServiceId};
use crate::errors::ReadinessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady(ReadinessError),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

pub fn check_readiness(app: &dyn ApplicationContext) -> Readiness {
    if !app.is_booted() {
        return Readiness::NotReady(ReadinessError::AppNotBooted);
    }
    debug!("Readiness: application booted");

    if !app.is_bound(ServiceId::Database) {
        return Readiness::NotReady(ReadinessError::DatabaseNotBound);
    }
    debug!("Readiness: {} service bound", ServiceId::Database);

    if !app.is_bound(ServiceId::Snapshot) {
        return Readiness::NotReady(ReadinessError::SnapshotNotBound);
    }
    debug!("Readiness: {} service bound", ServiceId::Snapshot);

    Readiness::Ready
}
