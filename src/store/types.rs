//! Store domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Vendor account link for a user
///
/// Only the argon2 hash of the password and the opaque vendor session
/// token are persisted. The plaintext password never leaves the
/// verify-and-save request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredCredentials {
    pub user_id: String,
    pub username: String,
    pub password_hash: String,
    pub session_token: String,
    pub last_sync: Option<DateTime<Utc>>,
}

/// Trail camera owned by a user, keyed by the vendor-assigned id
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Camera {
    pub user_id: String,
    pub camera_id: String,
    pub name: String,
    /// User-edited field. Vendor sync never overwrites it.
    pub notes: Option<String>,
    pub last_sync: Option<DateTime<Utc>>,
}

/// Photo taken by a trail camera, keyed by the vendor-assigned id
///
/// Immutable once written; re-upserting the same id is a no-op rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub user_id: String,
    pub camera_id: String,
    pub photo_id: String,
    /// When the camera took the photo
    pub taken_at: DateTime<Utc>,
    pub origin_date: Option<DateTime<Utc>>,
    pub origin_name: Option<String>,
    pub origin_size: Option<i64>,
    pub small_url: Option<String>,
    pub medium_url: Option<String>,
    pub large_url: Option<String>,
    pub tags: Vec<String>,
}

/// Map marker kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Camera,
    Stand,
    Feeder,
    Trail,
    Other,
}

impl Default for MarkerKind {
    fn default() -> Self {
        Self::Other
    }
}

impl MarkerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Stand => "stand",
            Self::Feeder => "feeder",
            Self::Trail => "trail",
            Self::Other => "other",
        }
    }
}

impl From<&str> for MarkerKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "camera" => Self::Camera,
            "stand" => Self::Stand,
            "feeder" => Self::Feeder,
            "trail" => Self::Trail,
            _ => Self::Other,
        }
    }
}

impl From<String> for MarkerKind {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// User-placed map marker
///
/// A camera-kind marker may carry a link to a stored camera. The UI
/// treats the link as 1:1 but nothing here enforces uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub marker_id: String,
    pub user_id: String,
    pub kind: MarkerKind,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub camera_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
