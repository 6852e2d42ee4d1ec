//! Sync pipeline service

use super::types::SyncSummary;
use crate::credentials::CredentialService;
use crate::error::{Error, Result};
use crate::spypoint::{PhotoFilter, VendorApi, VendorCamera, VendorPhoto};
use crate::store::{Camera, Photo, TrailStore};
use chrono::Utc;
use std::sync::Arc;

/// Camera Sync Service
pub struct CameraSyncService {
    store: Arc<dyn TrailStore>,
    vendor: Arc<dyn VendorApi>,
    credentials: Arc<CredentialService>,
    photo_page_limit: u32,
}

impl CameraSyncService {
    /// Create new service
    pub fn new(
        store: Arc<dyn TrailStore>,
        vendor: Arc<dyn VendorApi>,
        credentials: Arc<CredentialService>,
        photo_page_limit: u32,
    ) -> Self {
        Self {
            store,
            vendor,
            credentials,
            photo_page_limit,
        }
    }

    /// Verify-and-save (POST mode): login against the vendor, persist
    /// the link on success. No camera or photo enumeration here.
    ///
    /// Nothing is persisted when the vendor rejects the login.
    pub async fn verify_and_save(
        &self,
        user_id: &str,
        username: &str,
        password: &str,
    ) -> Result<()> {
        tracing::info!(user_id = %user_id, username = %username, "Verifying vendor credentials");

        let token = self.vendor.login(username, password).await?;
        self.credentials
            .save(user_id, username, password, token)
            .await?;

        Ok(())
    }

    /// Full sync (GET mode) with stored credentials.
    ///
    /// Pipeline: load stored link -> enumerate cameras with the stored
    /// session token -> per camera upsert + photo fetch + photo upserts,
    /// sequential and isolated -> stamp last_sync.
    pub async fn sync_user(&self, user_id: &str) -> Result<SyncSummary> {
        let creds = self.credentials.load(user_id).await?.ok_or_else(|| {
            Error::NotFound(format!("No stored credentials for user {}", user_id))
        })?;

        tracing::info!(
            user_id = %user_id,
            username = %creds.username,
            "Starting camera sync"
        );

        let cameras = self.vendor.list_cameras(&creds.session_token).await?;
        if cameras.is_empty() {
            return Err(Error::NoCameras(format!(
                "Vendor account for user {} has no cameras",
                user_id
            )));
        }

        let mut photos = 0usize;
        let mut failed_cameras = 0usize;

        // Sequential by design: one camera's failure is logged and the
        // loop continues with the next camera.
        for camera in &cameras {
            match self
                .sync_one_camera(user_id, &creds.session_token, camera)
                .await
            {
                Ok(count) => photos += count,
                Err(e) => {
                    failed_cameras += 1;
                    tracing::warn!(
                        user_id = %user_id,
                        camera_id = %camera.id,
                        error = %e,
                        "Camera sync failed, continuing with next camera"
                    );
                }
            }
        }

        self.credentials.touch_sync(user_id, Utc::now()).await?;

        tracing::info!(
            user_id = %user_id,
            cameras = cameras.len(),
            photos = photos,
            failed_cameras = failed_cameras,
            "Camera sync completed"
        );

        Ok(SyncSummary {
            cameras: cameras.len(),
            photos,
        })
    }

    /// One camera's block: camera upsert, photo page fetch, photo
    /// upserts. Any failure inside skips only this camera.
    async fn sync_one_camera(
        &self,
        user_id: &str,
        token: &str,
        vendor_camera: &VendorCamera,
    ) -> Result<usize> {
        let camera = Camera {
            user_id: user_id.to_string(),
            camera_id: vendor_camera.id.clone(),
            name: vendor_camera.display_name().to_string(),
            notes: None,
            last_sync: Some(Utc::now()),
        };
        self.store.upsert_camera(&camera).await?;

        let filter = PhotoFilter::all_photos(self.photo_page_limit);
        let vendor_photos = self
            .vendor
            .list_photos(token, &vendor_camera.id, &filter)
            .await?;

        let mut stored = 0usize;
        for vendor_photo in vendor_photos {
            let photo = build_photo(user_id, &vendor_camera.id, vendor_photo);
            self.store.upsert_photo(&photo).await?;
            stored += 1;
        }

        tracing::debug!(
            user_id = %user_id,
            camera_id = %vendor_camera.id,
            photos = stored,
            "Camera synced"
        );
        Ok(stored)
    }
}

/// Convert a vendor photo into its stored form, resolving the
/// per-resolution host/path pairs into absolute media URLs
fn build_photo(user_id: &str, camera_id: &str, vendor: VendorPhoto) -> Photo {
    Photo {
        user_id: user_id.to_string(),
        camera_id: camera_id.to_string(),
        photo_id: vendor.id,
        taken_at: vendor.date,
        origin_date: vendor.origin_date,
        origin_name: vendor.origin_name,
        origin_size: vendor.origin_size,
        small_url: vendor.small.map(|m| m.url()),
        medium_url: vendor.medium.map(|m| m.url()),
        large_url: vendor.large.map(|m| m.url()),
        tags: vendor.tags,
    }
}
