//! SpyPoint wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// dateEnd for the wide-open photo query. Far enough in the future that
/// the vendor returns the newest page first.
pub const FAR_FUTURE_DATE_END: &str = "2100-01-01T00:00:00.000Z";

/// Login request body
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub uuid: Option<String>,
}

/// Camera as the vendor returns it
#[derive(Debug, Clone, Deserialize)]
pub struct VendorCamera {
    pub id: String,
    #[serde(default)]
    pub config: VendorCameraConfig,
}

/// Camera config blob; only the display name is used
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorCameraConfig {
    #[serde(default)]
    pub name: String,
}

impl VendorCamera {
    /// Display name, falling back to the vendor id for unnamed cameras
    pub fn display_name(&self) -> &str {
        if self.config.name.is_empty() {
            &self.id
        } else {
            &self.config.name
        }
    }
}

/// Photo page filter sent with the photo query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFilter {
    pub date_end: String,
    pub limit: u32,
    pub tag: Vec<String>,
    pub favorite: bool,
    pub hd: bool,
}

impl PhotoFilter {
    /// Wide-open filter: newest page of everything
    pub fn all_photos(limit: u32) -> Self {
        Self {
            date_end: FAR_FUTURE_DATE_END.to_string(),
            limit,
            tag: vec![],
            favorite: false,
            hd: false,
        }
    }
}

/// Photo query body: camera ids plus the page filter
#[derive(Debug, Serialize)]
pub struct PhotoQuery<'a> {
    pub camera: Vec<&'a str>,
    #[serde(flatten)]
    pub filter: &'a PhotoFilter,
}

/// Photo page response
#[derive(Debug, Deserialize)]
pub struct PhotosResponse {
    #[serde(default)]
    pub photos: Vec<VendorPhoto>,
}

/// Photo as the vendor returns it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorPhoto {
    pub id: String,
    #[serde(default)]
    pub camera: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub origin_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub origin_name: Option<String>,
    #[serde(default)]
    pub origin_size: Option<i64>,
    #[serde(default)]
    pub small: Option<MediaRef>,
    #[serde(default)]
    pub medium: Option<MediaRef>,
    #[serde(default)]
    pub large: Option<MediaRef>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Per-resolution media location; host and path arrive separately
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRef {
    pub host: String,
    pub path: String,
}

impl MediaRef {
    /// Absolute https URL
    pub fn url(&self) -> String {
        format!(
            "https://{}/{}",
            self.host.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_ref_builds_absolute_url() {
        let media = MediaRef {
            host: "photos.example.com".to_string(),
            path: "u1/c1/abc.jpg".to_string(),
        };
        assert_eq!(media.url(), "https://photos.example.com/u1/c1/abc.jpg");

        let slashed = MediaRef {
            host: "photos.example.com/".to_string(),
            path: "/u1/c1/abc.jpg".to_string(),
        };
        assert_eq!(slashed.url(), "https://photos.example.com/u1/c1/abc.jpg");
    }

    #[test]
    fn all_photos_filter_is_wide_open() {
        let filter = PhotoFilter::all_photos(100);
        assert_eq!(filter.date_end, FAR_FUTURE_DATE_END);
        assert_eq!(filter.limit, 100);
        assert!(filter.tag.is_empty());
        assert!(!filter.favorite);
        assert!(!filter.hd);
    }

    #[test]
    fn vendor_photo_deserializes_from_api_json() {
        let json = r#"{
            "id": "64f1c2",
            "camera": "cam-1",
            "date": "2024-11-02T06:30:00.000Z",
            "originDate": "2024-11-02T06:29:58.000Z",
            "originName": "PICT0042.JPG",
            "originSize": 482133,
            "small": {"host": "s.spypoint.example", "path": "p/small.jpg"},
            "medium": {"host": "s.spypoint.example", "path": "p/medium.jpg"},
            "large": {"host": "s.spypoint.example", "path": "p/large.jpg"},
            "tags": ["deer", "buck"]
        }"#;

        let photo: VendorPhoto = serde_json::from_str(json).unwrap();
        assert_eq!(photo.id, "64f1c2");
        assert_eq!(photo.camera.as_deref(), Some("cam-1"));
        assert_eq!(photo.origin_name.as_deref(), Some("PICT0042.JPG"));
        assert_eq!(photo.origin_size, Some(482133));
        assert_eq!(photo.tags, vec!["deer", "buck"]);
        assert_eq!(
            photo.small.unwrap().url(),
            "https://s.spypoint.example/p/small.jpg"
        );
    }

    #[test]
    fn vendor_photo_tolerates_missing_media() {
        let json = r#"{"id": "a1", "date": "2024-11-02T06:30:00.000Z"}"#;
        let photo: VendorPhoto = serde_json::from_str(json).unwrap();
        assert!(photo.small.is_none());
        assert!(photo.tags.is_empty());
    }

    #[test]
    fn vendor_camera_falls_back_to_id_for_name() {
        let json = r#"{"id": "cam-9"}"#;
        let camera: VendorCamera = serde_json::from_str(json).unwrap();
        assert_eq!(camera.display_name(), "cam-9");

        let named = r#"{"id": "cam-9", "config": {"name": "Creek Crossing"}}"#;
        let camera: VendorCamera = serde_json::from_str(named).unwrap();
        assert_eq!(camera.display_name(), "Creek Crossing");
    }
}
