//! trailsync - Trail-Camera Photo Sync and Cache Server
//!
//! ## Architecture (7 Components)
//!
//! 1. TrailStore - per-user document store (MySQL or in-memory)
//! 2. SpypointClient - vendor API adapter (login, cameras, photo pages)
//! 3. CredentialService - vendor account links, argon2 at rest
//! 4. CameraSyncService - on-demand sync pipeline with per-camera isolation
//! 5. PhotoCache - key-addressed TTL read cache (general 5 min, photo 60 min)
//! 6. CameraDirectory - camera/photo read model
//! 7. MarkerService - map markers and the marker-camera linker
//!
//! ## Design Principles
//!
//! - Every store write is an idempotent last-write-wins upsert keyed by
//!   vendor-assigned ids; re-running a sync is always safe
//! - One camera's failure never aborts a sync run
//! - The cache is advisory: a miss always falls through to the store

pub mod camera_sync;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod markers;
pub mod models;
pub mod photo_cache;
pub mod spypoint;
pub mod state;
pub mod store;
pub mod web_api;

pub use error::{Error, Result};
pub use state::{AppConfig, AppState};
