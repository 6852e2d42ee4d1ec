//! TrailStore - Per-User Document Store
//!
//! ## Responsibilities
//!
//! - Persist vendor credentials, cameras, photos, markers per user
//! - Idempotent last-write-wins upserts keyed by vendor-assigned ids
//! - Camera upsert merges: user-edited notes are never overwritten
//!
//! Two backends: `MySqlStore` (durable) and `InMemoryStore` (dev/test).

mod memory;
mod mysql;
pub mod types;

pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
pub use types::{Camera, Marker, MarkerKind, Photo, StoredCredentials};

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage backend behind the sync pipeline and read models.
///
/// Every write is an idempotent upsert: replaying the pipeline with
/// identical vendor responses leaves the store unchanged.
#[async_trait]
pub trait TrailStore: Send + Sync {
    /// Overwrite the user's vendor account link
    async fn save_credentials(&self, creds: &StoredCredentials) -> Result<()>;
    async fn load_credentials(&self, user_id: &str) -> Result<Option<StoredCredentials>>;
    /// Stamp last_sync after a completed sync run
    async fn touch_credentials_sync(&self, user_id: &str, at: DateTime<Utc>) -> Result<()>;

    /// Insert or merge-update a camera. Updates name and last_sync,
    /// preserves notes.
    async fn upsert_camera(&self, camera: &Camera) -> Result<()>;
    async fn list_cameras(&self, user_id: &str) -> Result<Vec<Camera>>;
    async fn get_camera(&self, user_id: &str, camera_id: &str) -> Result<Option<Camera>>;
    async fn update_camera_notes(
        &self,
        user_id: &str,
        camera_id: &str,
        notes: &str,
    ) -> Result<()>;

    async fn upsert_photo(&self, photo: &Photo) -> Result<()>;
    /// Newest-first listing
    async fn list_photos(&self, user_id: &str, camera_id: &str, limit: u32) -> Result<Vec<Photo>>;
    /// Photo with the maximum taken_at, ties resolved per backend
    async fn recent_photo(&self, user_id: &str, camera_id: &str) -> Result<Option<Photo>>;

    async fn insert_marker(&self, marker: &Marker) -> Result<()>;
    async fn list_markers(&self, user_id: &str) -> Result<Vec<Marker>>;
    async fn get_marker(&self, user_id: &str, marker_id: &str) -> Result<Option<Marker>>;
    /// Set or clear the marker->camera link
    async fn set_marker_camera(
        &self,
        user_id: &str,
        marker_id: &str,
        camera_id: Option<&str>,
    ) -> Result<()>;

    async fn health_check(&self) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}
