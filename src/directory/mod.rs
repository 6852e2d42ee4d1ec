//! CameraDirectory - Camera/Photo Read Model
//!
//! ## Responsibilities
//!
//! - Camera listing and lookup over the document store
//! - Recent-photo lookup through the photo-class cache
//! - User notes editing (the field the sync merge preserves)

use crate::error::{Error, Result};
use crate::photo_cache::{RecentPhotoCache, TtlClass};
use crate::store::{Camera, Photo, TrailStore};
use std::sync::Arc;

/// CameraDirectory service
pub struct CameraDirectory {
    store: Arc<dyn TrailStore>,
    recent_photos: Arc<RecentPhotoCache>,
}

impl CameraDirectory {
    /// Create new directory
    pub fn new(store: Arc<dyn TrailStore>, recent_photos: Arc<RecentPhotoCache>) -> Self {
        Self {
            store,
            recent_photos,
        }
    }

    pub async fn list_cameras(&self, user_id: &str) -> Result<Vec<Camera>> {
        self.store.list_cameras(user_id).await
    }

    pub async fn get_camera(&self, user_id: &str, camera_id: &str) -> Result<Option<Camera>> {
        self.store.get_camera(user_id, camera_id).await
    }

    /// Newest-first photo listing
    pub async fn list_photos(
        &self,
        user_id: &str,
        camera_id: &str,
        limit: u32,
    ) -> Result<Vec<Photo>> {
        self.store.list_photos(user_id, camera_id, limit).await
    }

    /// Most recent photo (max taken_at), read through the photo-class
    /// cache. A miss falls through to the store; the hit path never
    /// touches it.
    pub async fn recent_photo(&self, user_id: &str, camera_id: &str) -> Result<Option<Photo>> {
        let key = cache_key(user_id, camera_id);
        if let Some(photo) = self.recent_photos.get(&key).await {
            tracing::trace!(camera_id = %camera_id, "Recent photo served from cache");
            return Ok(Some(photo));
        }

        let photo = self.store.recent_photo(user_id, camera_id).await?;
        if let Some(ref p) = photo {
            self.recent_photos
                .set(&key, p.clone(), TtlClass::Photo)
                .await;
        }
        Ok(photo)
    }

    /// Drop a camera's cached recent photo (linker invalidation path)
    pub async fn invalidate_recent(&self, user_id: &str, camera_id: &str) {
        self.recent_photos
            .invalidate(&cache_key(user_id, camera_id))
            .await;
    }

    /// Update the user-edited notes field
    pub async fn update_notes(
        &self,
        user_id: &str,
        camera_id: &str,
        notes: &str,
    ) -> Result<Camera> {
        self.store
            .update_camera_notes(user_id, camera_id, notes)
            .await?;
        self.store
            .get_camera(user_id, camera_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Camera {} not found", camera_id)))
    }
}

fn cache_key(user_id: &str, camera_id: &str) -> String {
    format!("{}:{}", user_id, camera_id)
}
