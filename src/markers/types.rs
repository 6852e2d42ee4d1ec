use serde::Deserialize;

use crate::store::MarkerKind;

/// Marker creation payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMarkerRequest {
    pub user_id: String,
    #[serde(default)]
    pub kind: MarkerKind,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Optional camera to link at creation time
    #[serde(default)]
    pub camera_id: Option<String>,
}

/// Body for the marker-camera link endpoint. `None` detaches.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCameraRequest {
    pub camera_id: Option<String>,
}
