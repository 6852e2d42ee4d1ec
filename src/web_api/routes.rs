//! API Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::markers::{CreateMarkerRequest, LinkCameraRequest};
use crate::models::ApiResponse;
use crate::state::AppState;

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(super::health_check))
        // SpyPoint sync trigger
        .route("/api/spypoint/sync", get(sync_with_stored_credentials))
        .route("/api/spypoint/sync", post(verify_and_save_credentials))
        .route("/api/spypoint/status", get(credential_status))
        // Cameras
        .route("/api/cameras", get(list_cameras))
        .route("/api/cameras/:id", get(get_camera))
        .route("/api/cameras/:id/notes", put(update_camera_notes))
        .route("/api/cameras/:id/photos", get(list_photos))
        .route("/api/cameras/:id/recent-photo", get(recent_photo))
        // Markers
        .route("/api/markers", get(list_markers))
        .route("/api/markers", post(create_marker))
        .route("/api/markers/:id", get(get_marker))
        .route("/api/markers/:id/camera", get(marker_camera))
        .route("/api/markers/:id/camera", put(link_marker_camera))
        .with_state(state)
}

// ========================================
// SpyPoint Sync Handlers
// ========================================

/// Query parameters shared by the user-scoped endpoints
#[derive(Debug, Deserialize)]
struct UserQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

impl UserQuery {
    /// Missing userId is a client error, not a deserialize failure
    fn require(&self) -> Result<&str> {
        self.user_id
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::MissingCredentials("userId is required".to_string()))
    }
}

/// Body for POST sync (verify-and-save mode)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest {
    user_id: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

/// Response for GET sync (full-sync mode)
#[derive(Debug, Serialize)]
struct SyncResponse {
    success: bool,
    #[serde(rename = "photosCount")]
    photos_count: usize,
    cameras: usize,
}

/// Response for POST sync (verify mode)
#[derive(Debug, Serialize)]
struct VerifyResponse {
    success: bool,
    message: String,
}

/// GET /api/spypoint/sync?userId=... - full sync with stored credentials
async fn sync_with_stored_credentials(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<SyncResponse>> {
    let user_id = query.require()?;
    let summary = state.camera_sync.sync_user(user_id).await?;

    Ok(Json(SyncResponse {
        success: true,
        photos_count: summary.photos,
        cameras: summary.cameras,
    }))
}

/// POST /api/spypoint/sync - verify credentials and save the link.
/// No camera or photo enumeration in this mode.
async fn verify_and_save_credentials(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    let user_id = req
        .user_id
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingCredentials("userId is required".to_string()))?;
    let username = req
        .username
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingCredentials("username is required".to_string()))?;
    let password = req
        .password
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingCredentials("password is required".to_string()))?;

    state
        .camera_sync
        .verify_and_save(user_id, username, password)
        .await?;

    Ok(Json(VerifyResponse {
        success: true,
        message: "Credentials verified and saved".to_string(),
    }))
}

/// GET /api/spypoint/status?userId=... - vendor link status for the UI
async fn credential_status(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse> {
    let user_id = query.require()?;
    let status = state.credentials.status(user_id).await?;
    Ok(Json(ApiResponse::success(status)))
}

// ========================================
// Camera Handlers
// ========================================

async fn list_cameras(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse> {
    let user_id = query.require()?;
    let cameras = state.directory.list_cameras(user_id).await?;
    Ok(Json(ApiResponse::success(cameras)))
}

async fn get_camera(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse> {
    let user_id = query.require()?;
    let camera = state
        .directory
        .get_camera(user_id, &id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Camera {} not found", id)))?;
    Ok(Json(ApiResponse::success(camera)))
}

/// Body for the camera notes endpoint
#[derive(Debug, Deserialize)]
struct UpdateNotesRequest {
    notes: String,
}

async fn update_camera_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
    Json(req): Json<UpdateNotesRequest>,
) -> Result<impl IntoResponse> {
    let user_id = query.require()?;
    let camera = state.directory.update_notes(user_id, &id, &req.notes).await?;
    Ok(Json(ApiResponse::success(camera)))
}

/// Photo listing query: userId plus an optional page limit
#[derive(Debug, Deserialize)]
struct PhotoListQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    limit: Option<u32>,
}

async fn list_photos(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PhotoListQuery>,
) -> Result<impl IntoResponse> {
    let user_id = query
        .user_id
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| Error::MissingCredentials("userId is required".to_string()))?;
    let limit = query.limit.unwrap_or(100);
    let photos = state.directory.list_photos(user_id, &id, limit).await?;
    Ok(Json(ApiResponse::success(photos)))
}

/// Most recent photo for a camera, served through the photo-class cache
async fn recent_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse> {
    let user_id = query.require()?;
    let photo = state
        .directory
        .recent_photo(user_id, &id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No photos for camera {}", id)))?;
    Ok(Json(ApiResponse::success(photo)))
}

// ========================================
// Marker Handlers
// ========================================

async fn list_markers(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse> {
    let user_id = query.require()?;
    let markers = state.markers.list(user_id).await?;
    Ok(Json(ApiResponse::success(markers)))
}

async fn create_marker(
    State(state): State<AppState>,
    Json(req): Json<CreateMarkerRequest>,
) -> Result<impl IntoResponse> {
    if req.user_id.is_empty() {
        return Err(Error::Validation("userId is required".to_string()));
    }
    let marker = state.markers.create(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(marker))))
}

async fn get_marker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse> {
    let user_id = query.require()?;
    let marker = state.markers.get(user_id, &id).await?;
    Ok(Json(ApiResponse::success(marker)))
}

/// Marker->camera lookup, served through the general-class cache
async fn marker_camera(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse> {
    let user_id = query.require()?;
    let camera = state.markers.marker_camera(user_id, &id).await?;
    Ok(Json(ApiResponse::success(camera)))
}

async fn link_marker_camera(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
    Json(req): Json<LinkCameraRequest>,
) -> Result<impl IntoResponse> {
    let user_id = query.require()?;
    let marker = state
        .markers
        .link_camera(user_id, &id, req.camera_id.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(marker)))
}
