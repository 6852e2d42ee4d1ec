//! Shared test fixtures: a scripted vendor double and an app builder
//! over the in-memory store.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use trailsync::error::{Error, Result};
use trailsync::spypoint::types::{MediaRef, VendorCameraConfig};
use trailsync::spypoint::{PhotoFilter, VendorApi, VendorCamera, VendorPhoto};
use trailsync::state::{AppConfig, AppState};
use trailsync::store::InMemoryStore;

/// Scripted SpyPoint double. Accepted credentials, camera list, photo
/// pages and per-camera failures are all set up front by the test.
#[derive(Default)]
pub struct ScriptedVendor {
    /// username/password pair the vendor accepts; None rejects everyone
    accepted: Mutex<Option<(String, String)>>,
    cameras: Mutex<Vec<VendorCamera>>,
    photos: Mutex<HashMap<String, Vec<VendorPhoto>>>,
    /// Camera ids whose photo fetch fails with an HTTP 500 equivalent
    failing_cameras: Mutex<HashSet<String>>,
    pub login_calls: AtomicUsize,
    pub camera_list_calls: AtomicUsize,
    pub photo_list_calls: AtomicUsize,
}

impl ScriptedVendor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&self, username: &str, password: &str) {
        *self.accepted.lock().unwrap() = Some((username.to_string(), password.to_string()));
    }

    pub fn add_camera(&self, id: &str, name: &str) {
        self.cameras.lock().unwrap().push(VendorCamera {
            id: id.to_string(),
            config: VendorCameraConfig {
                name: name.to_string(),
            },
        });
    }

    pub fn add_photo(&self, camera_id: &str, photo: VendorPhoto) {
        self.photos
            .lock()
            .unwrap()
            .entry(camera_id.to_string())
            .or_default()
            .push(photo);
    }

    pub fn fail_photos_for(&self, camera_id: &str) {
        self.failing_cameras
            .lock()
            .unwrap()
            .insert(camera_id.to_string());
    }
}

#[async_trait]
impl VendorApi for ScriptedVendor {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        match &*self.accepted.lock().unwrap() {
            Some((u, p)) if u == username && p == password => Ok("scripted-token".to_string()),
            _ => Err(Error::VendorAuth(
                "Vendor rejected login (HTTP 401)".to_string(),
            )),
        }
    }

    async fn list_cameras(&self, token: &str) -> Result<Vec<VendorCamera>> {
        self.camera_list_calls.fetch_add(1, Ordering::SeqCst);
        if token != "scripted-token" {
            return Err(Error::VendorAuth(
                "Vendor rejected session token (HTTP 401)".to_string(),
            ));
        }
        Ok(self.cameras.lock().unwrap().clone())
    }

    async fn list_photos(
        &self,
        token: &str,
        camera_id: &str,
        _filter: &PhotoFilter,
    ) -> Result<Vec<VendorPhoto>> {
        self.photo_list_calls.fetch_add(1, Ordering::SeqCst);
        if token != "scripted-token" {
            return Err(Error::VendorAuth(
                "Vendor rejected session token (HTTP 401)".to_string(),
            ));
        }
        if self.failing_cameras.lock().unwrap().contains(camera_id) {
            return Err(Error::VendorFetch(format!(
                "Photo fetch for camera {} failed (HTTP 500)",
                camera_id
            )));
        }
        Ok(self
            .photos
            .lock()
            .unwrap()
            .get(camera_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Vendor photo with a taken-at date on the given November 2024 day
pub fn vendor_photo(id: &str, camera_id: &str, day: u32) -> VendorPhoto {
    VendorPhoto {
        id: id.to_string(),
        camera: Some(camera_id.to_string()),
        date: taken_at(day),
        origin_date: None,
        origin_name: Some(format!("PICT{}.JPG", id)),
        origin_size: Some(400_000),
        small: Some(MediaRef {
            host: "photos.spypoint.example".to_string(),
            path: format!("{}/{}/small.jpg", camera_id, id),
        }),
        medium: Some(MediaRef {
            host: "photos.spypoint.example".to_string(),
            path: format!("{}/{}/medium.jpg", camera_id, id),
        }),
        large: Some(MediaRef {
            host: "photos.spypoint.example".to_string(),
            path: format!("{}/{}/large.jpg", camera_id, id),
        }),
        tags: vec!["deer".to_string()],
    }
}

pub fn taken_at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, day, 6, 30, 0).unwrap()
}

/// In-memory app state wired over a scripted vendor
pub fn test_state() -> (AppState, Arc<InMemoryStore>, Arc<ScriptedVendor>) {
    let store = Arc::new(InMemoryStore::new());
    let vendor = Arc::new(ScriptedVendor::new());
    let config = AppConfig {
        database_url: None,
        spypoint_url: "https://vendor.invalid".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        cache_ttl_general_secs: 300,
        cache_ttl_photo_secs: 3600,
        photo_page_limit: 100,
    };
    let state = AppState::build(config, store.clone(), vendor.clone());
    (state, store, vendor)
}

/// Router over a fresh in-memory app
pub fn test_app() -> (axum::Router, Arc<InMemoryStore>, Arc<ScriptedVendor>) {
    let (state, store, vendor) = test_state();
    (trailsync::web_api::create_router(state), store, vendor)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
