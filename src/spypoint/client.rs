//! SpyPoint HTTP client

use super::types::{
    LoginRequest, LoginResponse, PhotoFilter, PhotoQuery, PhotosResponse, VendorCamera,
    VendorPhoto,
};
use super::VendorApi;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Vendor API paths
mod endpoints {
    pub const LOGIN: &str = "/api/v3/user/login";
    pub const CAMERA_ALL: &str = "/api/v3/camera/all";
    pub const PHOTO_ALL: &str = "/api/v3/photo/all";
}

/// reqwest-backed SpyPoint client
#[derive(Clone)]
pub struct SpypointClient {
    http: Client,
    base_url: String,
}

impl SpypointClient {
    /// Create new client against the given API base URL
    pub fn new(base_url: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl VendorApi for SpypointClient {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = self.url(endpoints::LOGIN);
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: LoginResponse = response.json().await?;
            tracing::debug!(username = %username, "Vendor login succeeded");
            Ok(body.token)
        } else {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(
                username = %username,
                status = %status,
                body = %error_body,
                "Vendor login rejected"
            );
            Err(Error::VendorAuth(format!(
                "Vendor rejected login (HTTP {})",
                status.as_u16()
            )))
        }
    }

    async fn list_cameras(&self, token: &str) -> Result<Vec<VendorCamera>> {
        let url = self.url(endpoints::CAMERA_ALL);
        let response = self.http.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        if status.is_success() {
            let cameras: Vec<VendorCamera> = response.json().await?;
            tracing::debug!(count = cameras.len(), "Vendor camera list fetched");
            return Ok(cameras);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(Error::VendorAuth(format!(
                "Vendor rejected session token (HTTP {})",
                status.as_u16()
            ))),
            code => {
                tracing::warn!(status = %status, body = %error_body, "Camera list failed");
                Err(Error::VendorFetch(format!(
                    "Camera list failed (HTTP {})",
                    code
                )))
            }
        }
    }

    async fn list_photos(
        &self,
        token: &str,
        camera_id: &str,
        filter: &PhotoFilter,
    ) -> Result<Vec<VendorPhoto>> {
        let url = self.url(endpoints::PHOTO_ALL);
        let query = PhotoQuery {
            camera: vec![camera_id],
            filter,
        };
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&query)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: PhotosResponse = response.json().await?;
            tracing::debug!(
                camera_id = %camera_id,
                count = body.photos.len(),
                "Vendor photo page fetched"
            );
            return Ok(body.photos);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(Error::VendorAuth(format!(
                "Vendor rejected session token (HTTP {})",
                status.as_u16()
            ))),
            code => {
                tracing::warn!(
                    camera_id = %camera_id,
                    status = %status,
                    body = %error_body,
                    "Photo page failed"
                );
                Err(Error::VendorFetch(format!(
                    "Photo fetch for camera {} failed (HTTP {})",
                    camera_id, code
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = SpypointClient::new("https://restapi.spypoint.com".to_string());
        assert_eq!(
            client.url(endpoints::LOGIN),
            "https://restapi.spypoint.com/api/v3/user/login"
        );

        let slashed = SpypointClient::new("https://restapi.spypoint.com/".to_string());
        assert_eq!(
            slashed.url(endpoints::PHOTO_ALL),
            "https://restapi.spypoint.com/api/v3/photo/all"
        );
    }

    #[test]
    fn photo_query_serializes_camera_and_filter() {
        let filter = PhotoFilter::all_photos(50);
        let query = PhotoQuery {
            camera: vec!["cam-1"],
            filter: &filter,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["camera"][0], "cam-1");
        assert_eq!(json["limit"], 50);
        assert_eq!(json["dateEnd"], super::super::types::FAR_FUTURE_DATE_END);
    }
}
