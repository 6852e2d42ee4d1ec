//! Application state
//!
//! Holds all shared components and state

use crate::camera_sync::CameraSyncService;
use crate::credentials::CredentialService;
use crate::directory::CameraDirectory;
use crate::markers::MarkerService;
use crate::photo_cache::{MarkerCameraCache, RecentPhotoCache, TtlPolicy};
use crate::spypoint::VendorApi;
use crate::store::TrailStore;
use std::sync::Arc;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database URL (unset: in-memory store)
    pub database_url: Option<String>,
    /// SpyPoint REST API base URL
    pub spypoint_url: String,
    /// Server port
    pub port: u16,
    /// Server host
    pub host: String,
    /// General cache TTL in seconds (marker lookups)
    pub cache_ttl_general_secs: u64,
    /// Photo cache TTL in seconds (recent-photo lookups)
    pub cache_ttl_photo_secs: u64,
    /// Max photos requested per camera per sync
    pub photo_page_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            spypoint_url: std::env::var("SPYPOINT_URL")
                .unwrap_or_else(|_| "https://restapi.spypoint.com".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            cache_ttl_general_secs: std::env::var("CACHE_TTL_GENERAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_ttl_photo_secs: std::env::var("CACHE_TTL_PHOTO_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            photo_page_limit: std::env::var("PHOTO_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

impl AppConfig {
    /// Cache TTL policy built from the configured durations
    pub fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy {
            general: Duration::from_secs(self.cache_ttl_general_secs),
            photo: Duration::from_secs(self.cache_ttl_photo_secs),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Document store (MySQL or in-memory)
    pub store: Arc<dyn TrailStore>,
    /// CredentialService (vendor account links)
    pub credentials: Arc<CredentialService>,
    /// CameraSyncService (vendor sync pipeline)
    pub camera_sync: Arc<CameraSyncService>,
    /// CameraDirectory (camera/photo read model)
    pub directory: Arc<CameraDirectory>,
    /// MarkerService (map markers + camera linker)
    pub markers: Arc<MarkerService>,
}

impl AppState {
    /// Wire the full service graph over a store and a vendor client.
    ///
    /// Both caches are created here so the directory and the marker
    /// linker share the instances they invalidate.
    pub fn build(
        config: AppConfig,
        store: Arc<dyn TrailStore>,
        vendor: Arc<dyn VendorApi>,
    ) -> Self {
        let policy = config.ttl_policy();
        let recent_photos = Arc::new(RecentPhotoCache::new(policy.clone()));
        let marker_cameras = Arc::new(MarkerCameraCache::new(policy));

        let credentials = Arc::new(CredentialService::new(store.clone()));
        let camera_sync = Arc::new(CameraSyncService::new(
            store.clone(),
            vendor,
            credentials.clone(),
            config.photo_page_limit,
        ));
        let directory = Arc::new(CameraDirectory::new(store.clone(), recent_photos));
        let markers = Arc::new(MarkerService::new(
            store.clone(),
            directory.clone(),
            marker_cameras,
        ));

        Self {
            config,
            store,
            credentials,
            camera_sync,
            directory,
            markers,
        }
    }
}

