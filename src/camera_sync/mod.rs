//! CameraSync - On-Demand Vendor Photo Sync
//!
//! ## Responsibilities
//!
//! - Verify-and-save: vendor login, then credential persist (no photos)
//! - Full sync: enumerate cameras, fetch photo pages, upsert documents
//! - Per-camera failure isolation: one bad camera never aborts the run
//!
//! All writes are idempotent last-write-wins upserts keyed by the
//! vendor-assigned ids, so re-running a sync is always safe.

mod service;
pub mod types;

pub use service::CameraSyncService;
pub use types::SyncSummary;
