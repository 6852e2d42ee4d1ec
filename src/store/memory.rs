//! In-memory store backend
//!
//! HashMaps guarded by `tokio::sync::RwLock`. Not durable; used for
//! local development (no DATABASE_URL) and tests.

use super::types::{Camera, Marker, Photo, StoredCredentials};
use super::TrailStore;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory TrailStore
#[derive(Default)]
pub struct InMemoryStore {
    /// user_id -> credentials
    credentials: Arc<RwLock<HashMap<String, StoredCredentials>>>,
    /// (user_id, camera_id) -> camera
    cameras: Arc<RwLock<HashMap<(String, String), Camera>>>,
    /// (user_id, camera_id, photo_id) -> photo
    photos: Arc<RwLock<HashMap<(String, String, String), Photo>>>,
    /// (user_id, marker_id) -> marker
    markers: Arc<RwLock<HashMap<(String, String), Marker>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrailStore for InMemoryStore {
    async fn save_credentials(&self, creds: &StoredCredentials) -> Result<()> {
        let mut map = self.credentials.write().await;
        map.insert(creds.user_id.clone(), creds.clone());
        Ok(())
    }

    async fn load_credentials(&self, user_id: &str) -> Result<Option<StoredCredentials>> {
        let map = self.credentials.read().await;
        Ok(map.get(user_id).cloned())
    }

    async fn touch_credentials_sync(&self, user_id: &str, at: DateTime<Utc>) -> Result<()> {
        let mut map = self.credentials.write().await;
        match map.get_mut(user_id) {
            Some(creds) => {
                creds.last_sync = Some(at);
                Ok(())
            }
            None => Err(Error::NotFound(format!(
                "No stored credentials for user {}",
                user_id
            ))),
        }
    }

    async fn upsert_camera(&self, camera: &Camera) -> Result<()> {
        let mut map = self.cameras.write().await;
        let key = (camera.user_id.clone(), camera.camera_id.clone());
        match map.get_mut(&key) {
            // Merge: vendor sync never touches user-edited notes
            Some(existing) => {
                existing.name = camera.name.clone();
                existing.last_sync = camera.last_sync;
            }
            None => {
                map.insert(key, camera.clone());
            }
        }
        Ok(())
    }

    async fn list_cameras(&self, user_id: &str) -> Result<Vec<Camera>> {
        let map = self.cameras.read().await;
        let mut cameras: Vec<Camera> = map
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        cameras.sort_by(|a, b| a.camera_id.cmp(&b.camera_id));
        Ok(cameras)
    }

    async fn get_camera(&self, user_id: &str, camera_id: &str) -> Result<Option<Camera>> {
        let map = self.cameras.read().await;
        Ok(map
            .get(&(user_id.to_string(), camera_id.to_string()))
            .cloned())
    }

    async fn update_camera_notes(
        &self,
        user_id: &str,
        camera_id: &str,
        notes: &str,
    ) -> Result<()> {
        let mut map = self.cameras.write().await;
        match map.get_mut(&(user_id.to_string(), camera_id.to_string())) {
            Some(camera) => {
                camera.notes = Some(notes.to_string());
                Ok(())
            }
            None => Err(Error::NotFound(format!("Camera {} not found", camera_id))),
        }
    }

    async fn upsert_photo(&self, photo: &Photo) -> Result<()> {
        let mut map = self.photos.write().await;
        let key = (
            photo.user_id.clone(),
            photo.camera_id.clone(),
            photo.photo_id.clone(),
        );
        map.insert(key, photo.clone());
        Ok(())
    }

    async fn list_photos(&self, user_id: &str, camera_id: &str, limit: u32) -> Result<Vec<Photo>> {
        let map = self.photos.read().await;
        let mut photos: Vec<Photo> = map
            .values()
            .filter(|p| p.user_id == user_id && p.camera_id == camera_id)
            .cloned()
            .collect();
        photos.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
        photos.truncate(limit as usize);
        Ok(photos)
    }

    async fn recent_photo(&self, user_id: &str, camera_id: &str) -> Result<Option<Photo>> {
        let map = self.photos.read().await;
        // Strict comparison keeps the first maximum on equal taken_at
        let mut recent: Option<&Photo> = None;
        for photo in map
            .values()
            .filter(|p| p.user_id == user_id && p.camera_id == camera_id)
        {
            match recent {
                Some(r) if photo.taken_at <= r.taken_at => {}
                _ => recent = Some(photo),
            }
        }
        Ok(recent.cloned())
    }

    async fn insert_marker(&self, marker: &Marker) -> Result<()> {
        let mut map = self.markers.write().await;
        map.insert(
            (marker.user_id.clone(), marker.marker_id.clone()),
            marker.clone(),
        );
        Ok(())
    }

    async fn list_markers(&self, user_id: &str) -> Result<Vec<Marker>> {
        let map = self.markers.read().await;
        let mut markers: Vec<Marker> = map
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        markers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(markers)
    }

    async fn get_marker(&self, user_id: &str, marker_id: &str) -> Result<Option<Marker>> {
        let map = self.markers.read().await;
        Ok(map
            .get(&(user_id.to_string(), marker_id.to_string()))
            .cloned())
    }

    async fn set_marker_camera(
        &self,
        user_id: &str,
        marker_id: &str,
        camera_id: Option<&str>,
    ) -> Result<()> {
        let mut map = self.markers.write().await;
        match map.get_mut(&(user_id.to_string(), marker_id.to_string())) {
            Some(marker) => {
                marker.camera_id = camera_id.map(|s| s.to_string());
                Ok(())
            }
            None => Err(Error::NotFound(format!("Marker {} not found", marker_id))),
        }
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn camera(user: &str, id: &str, name: &str) -> Camera {
        Camera {
            user_id: user.to_string(),
            camera_id: id.to_string(),
            name: name.to_string(),
            notes: None,
            last_sync: None,
        }
    }

    fn photo(user: &str, camera: &str, id: &str, taken_at: DateTime<Utc>) -> Photo {
        Photo {
            user_id: user.to_string(),
            camera_id: camera.to_string(),
            photo_id: id.to_string(),
            taken_at,
            origin_date: None,
            origin_name: None,
            origin_size: None,
            small_url: None,
            medium_url: None,
            large_url: None,
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn camera_upsert_preserves_notes() {
        let store = InMemoryStore::new();
        store.upsert_camera(&camera("u1", "c1", "North Field")).await.unwrap();
        store.update_camera_notes("u1", "c1", "by the creek").await.unwrap();

        // Re-sync with a renamed camera
        let mut renamed = camera("u1", "c1", "North Field HD");
        renamed.last_sync = Some(Utc::now());
        store.upsert_camera(&renamed).await.unwrap();

        let stored = store.get_camera("u1", "c1").await.unwrap().unwrap();
        assert_eq!(stored.name, "North Field HD");
        assert_eq!(stored.notes.as_deref(), Some("by the creek"));
        assert!(stored.last_sync.is_some());
    }

    #[tokio::test]
    async fn photo_upsert_is_idempotent() {
        let store = InMemoryStore::new();
        let taken = Utc.with_ymd_and_hms(2024, 11, 2, 6, 30, 0).unwrap();
        let p = photo("u1", "c1", "p1", taken);

        store.upsert_photo(&p).await.unwrap();
        store.upsert_photo(&p).await.unwrap();

        let photos = store.list_photos("u1", "c1", 100).await.unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].photo_id, "p1");
    }

    #[tokio::test]
    async fn recent_photo_picks_max_taken_at() {
        let store = InMemoryStore::new();
        let d1 = Utc.with_ymd_and_hms(2024, 11, 1, 6, 0, 0).unwrap();
        let d2 = Utc.with_ymd_and_hms(2024, 11, 2, 6, 0, 0).unwrap();
        let d3 = Utc.with_ymd_and_hms(2024, 11, 3, 6, 0, 0).unwrap();

        store.upsert_photo(&photo("u1", "c1", "p2", d2)).await.unwrap();
        store.upsert_photo(&photo("u1", "c1", "p3", d3)).await.unwrap();
        store.upsert_photo(&photo("u1", "c1", "p1", d1)).await.unwrap();

        let recent = store.recent_photo("u1", "c1").await.unwrap().unwrap();
        assert_eq!(recent.photo_id, "p3");
        assert_eq!(recent.taken_at, d3);
    }

    #[tokio::test]
    async fn photos_are_scoped_per_camera() {
        let store = InMemoryStore::new();
        let d = Utc.with_ymd_and_hms(2024, 11, 1, 6, 0, 0).unwrap();
        store.upsert_photo(&photo("u1", "c1", "p1", d)).await.unwrap();
        store.upsert_photo(&photo("u1", "c2", "p2", d)).await.unwrap();

        let photos = store.list_photos("u1", "c1", 100).await.unwrap();
        assert_eq!(photos.len(), 1);
        assert!(store.recent_photo("u1", "c2").await.unwrap().is_some());
        assert!(store.recent_photo("u1", "c3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn marker_link_roundtrip() {
        let store = InMemoryStore::new();
        let marker = Marker {
            marker_id: "m1".to_string(),
            user_id: "u1".to_string(),
            kind: crate::store::MarkerKind::Camera,
            name: "Ridge stand".to_string(),
            lat: 44.97,
            lng: -93.26,
            camera_id: None,
            created_at: Utc::now(),
        };
        store.insert_marker(&marker).await.unwrap();

        store.set_marker_camera("u1", "m1", Some("c1")).await.unwrap();
        let stored = store.get_marker("u1", "m1").await.unwrap().unwrap();
        assert_eq!(stored.camera_id.as_deref(), Some("c1"));

        store.set_marker_camera("u1", "m1", None).await.unwrap();
        let stored = store.get_marker("u1", "m1").await.unwrap().unwrap();
        assert!(stored.camera_id.is_none());
    }
}
