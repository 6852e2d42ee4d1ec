use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::directory::CameraDirectory;
use crate::error::{Error, Result};
use crate::photo_cache::{MarkerCameraCache, TtlClass};
use crate::store::{Camera, Marker, TrailStore};

use super::types::CreateMarkerRequest;

/// Map marker CRUD plus the marker-camera linker.
///
/// Linking writes through to the store and drops the advisory cache
/// entries that could still serve the pre-link view: the marker's own
/// camera lookup and the camera's recent photo.
pub struct MarkerService {
    store: Arc<dyn TrailStore>,
    directory: Arc<CameraDirectory>,
    marker_cameras: Arc<MarkerCameraCache>,
}

impl MarkerService {
    pub fn new(
        store: Arc<dyn TrailStore>,
        directory: Arc<CameraDirectory>,
        marker_cameras: Arc<MarkerCameraCache>,
    ) -> Self {
        Self {
            store,
            directory,
            marker_cameras,
        }
    }

    /// Create a marker. A camera id supplied at creation time is
    /// validated the same way `link_camera` validates it.
    pub async fn create(&self, req: CreateMarkerRequest) -> Result<Marker> {
        if let Some(ref camera_id) = req.camera_id {
            self.require_camera(&req.user_id, camera_id).await?;
        }

        let marker = Marker {
            marker_id: Uuid::new_v4().to_string(),
            user_id: req.user_id,
            kind: req.kind,
            name: req.name,
            lat: req.lat,
            lng: req.lng,
            camera_id: req.camera_id,
            created_at: Utc::now(),
        };
        self.store.insert_marker(&marker).await?;
        tracing::info!(
            marker_id = %marker.marker_id,
            kind = %marker.kind.as_str(),
            "Marker created"
        );
        Ok(marker)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Marker>> {
        self.store.list_markers(user_id).await
    }

    pub async fn get(&self, user_id: &str, marker_id: &str) -> Result<Marker> {
        self.store
            .get_marker(user_id, marker_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Marker {} not found", marker_id)))
    }

    /// Set or clear the marker's camera link. Both sides are validated;
    /// the cached marker->camera lookup and the camera's cached recent
    /// photo are invalidated so the next read reflects the new link.
    pub async fn link_camera(
        &self,
        user_id: &str,
        marker_id: &str,
        camera_id: Option<&str>,
    ) -> Result<Marker> {
        self.get(user_id, marker_id).await?;
        if let Some(camera_id) = camera_id {
            self.require_camera(user_id, camera_id).await?;
        }

        self.store
            .set_marker_camera(user_id, marker_id, camera_id)
            .await?;

        self.marker_cameras
            .invalidate(&cache_key(user_id, marker_id))
            .await;
        if let Some(camera_id) = camera_id {
            self.directory.invalidate_recent(user_id, camera_id).await;
        }

        tracing::info!(
            marker_id = %marker_id,
            camera_id = ?camera_id,
            "Marker camera link updated"
        );
        self.get(user_id, marker_id).await
    }

    /// Cached marker->camera lookup (general-class entries). `None`
    /// means the marker has no linked camera.
    pub async fn marker_camera(&self, user_id: &str, marker_id: &str) -> Result<Option<Camera>> {
        let key = cache_key(user_id, marker_id);
        if let Some(camera) = self.marker_cameras.get(&key).await {
            return Ok(Some(camera));
        }

        let marker = self.get(user_id, marker_id).await?;
        let Some(camera_id) = marker.camera_id else {
            return Ok(None);
        };

        let camera = self.store.get_camera(user_id, &camera_id).await?;
        if let Some(ref c) = camera {
            self.marker_cameras
                .set(&key, c.clone(), TtlClass::General)
                .await;
        }
        Ok(camera)
    }

    async fn require_camera(&self, user_id: &str, camera_id: &str) -> Result<Camera> {
        self.store
            .get_camera(user_id, camera_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Camera {} not found", camera_id)))
    }
}

fn cache_key(user_id: &str, marker_id: &str) -> String {
    format!("{}:{}", user_id, marker_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo_cache::TtlCache;
    use crate::store::{InMemoryStore, MarkerKind};

    fn camera(id: &str, name: &str) -> Camera {
        Camera {
            user_id: "u1".to_string(),
            camera_id: id.to_string(),
            name: name.to_string(),
            notes: None,
            last_sync: None,
        }
    }

    fn create_req(camera_id: Option<&str>) -> CreateMarkerRequest {
        CreateMarkerRequest {
            user_id: "u1".to_string(),
            kind: MarkerKind::Stand,
            name: "Oak stand".to_string(),
            lat: 43.1,
            lng: -89.5,
            camera_id: camera_id.map(str::to_string),
        }
    }

    fn service(store: Arc<InMemoryStore>) -> MarkerService {
        let recent = Arc::new(TtlCache::with_defaults());
        let directory = Arc::new(CameraDirectory::new(store.clone(), recent));
        MarkerService::new(store, directory, Arc::new(TtlCache::with_defaults()))
    }

    #[tokio::test]
    async fn create_assigns_id_and_rejects_unknown_camera() {
        let store = Arc::new(InMemoryStore::new());
        let service = service(store.clone());

        let marker = service.create(create_req(None)).await.unwrap();
        assert!(!marker.marker_id.is_empty());
        assert_eq!(marker.kind, MarkerKind::Stand);

        let err = service.create(create_req(Some("ghost"))).await;
        assert!(matches!(err, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn link_camera_persists_and_detaches() {
        let store = Arc::new(InMemoryStore::new());
        store.upsert_camera(&camera("c1", "Ridge")).await.unwrap();
        let service = service(store.clone());

        let marker = service.create(create_req(None)).await.unwrap();

        let linked = service
            .link_camera("u1", &marker.marker_id, Some("c1"))
            .await
            .unwrap();
        assert_eq!(linked.camera_id.as_deref(), Some("c1"));

        let detached = service
            .link_camera("u1", &marker.marker_id, None)
            .await
            .unwrap();
        assert_eq!(detached.camera_id, None);
    }

    #[tokio::test]
    async fn link_camera_validates_both_sides() {
        let store = Arc::new(InMemoryStore::new());
        let service = service(store.clone());

        let missing_marker = service.link_camera("u1", "nope", None).await;
        assert!(matches!(missing_marker, Err(Error::NotFound(_))));

        let marker = service.create(create_req(None)).await.unwrap();
        let missing_camera = service
            .link_camera("u1", &marker.marker_id, Some("ghost"))
            .await;
        assert!(matches!(missing_camera, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn marker_camera_is_cached_until_relinked() {
        let store = Arc::new(InMemoryStore::new());
        store.upsert_camera(&camera("c1", "Ridge")).await.unwrap();
        store.upsert_camera(&camera("c2", "Creek")).await.unwrap();
        let service = service(store.clone());

        let marker = service.create(create_req(Some("c1"))).await.unwrap();

        let first = service
            .marker_camera("u1", &marker.marker_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.camera_id, "c1");

        // Relinking drops the cached entry
        service
            .link_camera("u1", &marker.marker_id, Some("c2"))
            .await
            .unwrap();
        let second = service
            .marker_camera("u1", &marker.marker_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.camera_id, "c2");
    }

    #[tokio::test]
    async fn marker_camera_is_none_for_unlinked_marker() {
        let store = Arc::new(InMemoryStore::new());
        let service = service(store.clone());

        let marker = service.create(create_req(None)).await.unwrap();
        let camera = service.marker_camera("u1", &marker.marker_id).await.unwrap();
        assert!(camera.is_none());
    }
}
