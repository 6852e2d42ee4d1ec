//! Camera sync types

use serde::Serialize;

/// Outcome counts for one sync run
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    /// Cameras the vendor enumerated (every one gets a camera doc
    /// before its photo fetch can fail)
    pub cameras: usize,
    /// Photos upserted across the cameras whose block succeeded
    pub photos: usize,
}
