//! MarkerService - Map Markers and the Camera Linker
//!
//! ## Responsibilities
//!
//! - Marker CRUD (stands, feeders, trails, camera positions)
//! - Marker-camera link management with cache invalidation
//! - Cached marker->camera lookup for map popups

mod service;
pub mod types;

pub use service::MarkerService;
pub use types::{CreateMarkerRequest, LinkCameraRequest};
