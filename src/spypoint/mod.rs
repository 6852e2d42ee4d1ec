//! SpypointClient - Vendor API Adapter
//!
//! ## Responsibilities
//!
//! - Login (username/password -> session token)
//! - Camera enumeration for the account
//! - Per-camera photo pages with media URL construction
//!
//! The client is stateless: tokens are passed in by the caller. No
//! retries here; the orchestrator owns failure policy.

mod client;
pub mod types;

pub use client::SpypointClient;
pub use types::{MediaRef, PhotoFilter, VendorCamera, VendorPhoto};

use crate::error::Result;
use async_trait::async_trait;

/// Vendor photo feed operations used by the sync pipeline.
///
/// Trait seam so the pipeline can run against a scripted vendor in
/// tests.
#[async_trait]
pub trait VendorApi: Send + Sync {
    /// Exchange username/password for a session token
    async fn login(&self, username: &str, password: &str) -> Result<String>;
    /// Enumerate the account's cameras
    async fn list_cameras(&self, token: &str) -> Result<Vec<VendorCamera>>;
    /// Fetch one page of photos for a camera
    async fn list_photos(
        &self,
        token: &str,
        camera_id: &str,
        filter: &PhotoFilter,
    ) -> Result<Vec<VendorPhoto>>;
}
