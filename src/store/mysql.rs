//! MySQL store backend
//!
//! Upserts use `INSERT ... ON DUPLICATE KEY UPDATE` keyed by the
//! vendor-assigned ids. The camera upsert deliberately leaves `notes`
//! out of the update list so user edits survive every sync.

use super::types::{Camera, Marker, Photo, StoredCredentials};
use super::TrailStore;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::MySqlPool;

/// MySQL TrailStore
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Create new store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Photo SELECT columns
    const PHOTO_COLUMNS: &'static str = r#"
        user_id, camera_id, photo_id, taken_at, origin_date, origin_name,
        origin_size, small_url, medium_url, large_url, tags
    "#;

    /// Marker SELECT columns
    const MARKER_COLUMNS: &'static str = r#"
        marker_id, user_id, kind, name, lat, lng, camera_id, created_at
    "#;

    /// Bootstrap tables (idempotent DDL, run at startup)
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vendor_credentials (
                user_id VARCHAR(64) NOT NULL PRIMARY KEY,
                username VARCHAR(255) NOT NULL,
                password_hash VARCHAR(255) NOT NULL,
                session_token VARCHAR(512) NOT NULL,
                last_sync DATETIME(3) NULL,
                created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
                updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3)
                    ON UPDATE CURRENT_TIMESTAMP(3)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cameras (
                user_id VARCHAR(64) NOT NULL,
                camera_id VARCHAR(64) NOT NULL,
                name VARCHAR(255) NOT NULL,
                notes TEXT NULL,
                last_sync DATETIME(3) NULL,
                created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
                updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3)
                    ON UPDATE CURRENT_TIMESTAMP(3),
                PRIMARY KEY (user_id, camera_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS photos (
                user_id VARCHAR(64) NOT NULL,
                camera_id VARCHAR(64) NOT NULL,
                photo_id VARCHAR(64) NOT NULL,
                taken_at DATETIME(3) NOT NULL,
                origin_date DATETIME(3) NULL,
                origin_name VARCHAR(255) NULL,
                origin_size BIGINT NULL,
                small_url TEXT NULL,
                medium_url TEXT NULL,
                large_url TEXT NULL,
                tags JSON NOT NULL,
                created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
                PRIMARY KEY (user_id, camera_id, photo_id),
                KEY idx_photos_taken (user_id, camera_id, taken_at)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS markers (
                marker_id VARCHAR(64) NOT NULL PRIMARY KEY,
                user_id VARCHAR(64) NOT NULL,
                kind VARCHAR(32) NOT NULL,
                name VARCHAR(255) NOT NULL,
                lat DOUBLE NOT NULL,
                lng DOUBLE NOT NULL,
                camera_id VARCHAR(64) NULL,
                created_at DATETIME(3) NOT NULL,
                updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3)
                    ON UPDATE CURRENT_TIMESTAMP(3),
                KEY idx_markers_user (user_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Store schema ensured");
        Ok(())
    }
}

#[async_trait]
impl TrailStore for MySqlStore {
    async fn save_credentials(&self, creds: &StoredCredentials) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vendor_credentials
                (user_id, username, password_hash, session_token, last_sync)
            VALUES
                (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                username = VALUES(username),
                password_hash = VALUES(password_hash),
                session_token = VALUES(session_token),
                last_sync = VALUES(last_sync)
            "#,
        )
        .bind(&creds.user_id)
        .bind(&creds.username)
        .bind(&creds.password_hash)
        .bind(&creds.session_token)
        .bind(creds.last_sync)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_credentials(&self, user_id: &str) -> Result<Option<StoredCredentials>> {
        let creds = sqlx::query_as::<_, StoredCredentials>(
            r#"
            SELECT user_id, username, password_hash, session_token, last_sync
            FROM vendor_credentials
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(creds)
    }

    async fn touch_credentials_sync(&self, user_id: &str, at: DateTime<Utc>) -> Result<()> {
        let result = sqlx::query(
            "UPDATE vendor_credentials SET last_sync = ? WHERE user_id = ?",
        )
        .bind(at)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "No stored credentials for user {}",
                user_id
            )));
        }
        Ok(())
    }

    async fn upsert_camera(&self, camera: &Camera) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cameras (user_id, camera_id, name, notes, last_sync)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                name = VALUES(name),
                last_sync = VALUES(last_sync)
            "#,
        )
        .bind(&camera.user_id)
        .bind(&camera.camera_id)
        .bind(&camera.name)
        .bind(&camera.notes)
        .bind(camera.last_sync)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_cameras(&self, user_id: &str) -> Result<Vec<Camera>> {
        let cameras = sqlx::query_as::<_, Camera>(
            r#"
            SELECT user_id, camera_id, name, notes, last_sync
            FROM cameras
            WHERE user_id = ?
            ORDER BY camera_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cameras)
    }

    async fn get_camera(&self, user_id: &str, camera_id: &str) -> Result<Option<Camera>> {
        let camera = sqlx::query_as::<_, Camera>(
            r#"
            SELECT user_id, camera_id, name, notes, last_sync
            FROM cameras
            WHERE user_id = ? AND camera_id = ?
            "#,
        )
        .bind(user_id)
        .bind(camera_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(camera)
    }

    async fn update_camera_notes(
        &self,
        user_id: &str,
        camera_id: &str,
        notes: &str,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE cameras SET notes = ? WHERE user_id = ? AND camera_id = ?",
        )
        .bind(notes)
        .bind(user_id)
        .bind(camera_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Camera {} not found", camera_id)));
        }
        Ok(())
    }

    async fn upsert_photo(&self, photo: &Photo) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO photos
                (user_id, camera_id, photo_id, taken_at, origin_date, origin_name,
                 origin_size, small_url, medium_url, large_url, tags)
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                taken_at = VALUES(taken_at),
                origin_date = VALUES(origin_date),
                origin_name = VALUES(origin_name),
                origin_size = VALUES(origin_size),
                small_url = VALUES(small_url),
                medium_url = VALUES(medium_url),
                large_url = VALUES(large_url),
                tags = VALUES(tags)
            "#,
        )
        .bind(&photo.user_id)
        .bind(&photo.camera_id)
        .bind(&photo.photo_id)
        .bind(photo.taken_at)
        .bind(photo.origin_date)
        .bind(&photo.origin_name)
        .bind(photo.origin_size)
        .bind(&photo.small_url)
        .bind(&photo.medium_url)
        .bind(&photo.large_url)
        .bind(Json(&photo.tags))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_photos(&self, user_id: &str, camera_id: &str, limit: u32) -> Result<Vec<Photo>> {
        let query = format!(
            "SELECT {} FROM photos WHERE user_id = ? AND camera_id = ? ORDER BY taken_at DESC LIMIT ?",
            Self::PHOTO_COLUMNS
        );
        let rows = sqlx::query_as::<_, PhotoRow>(&query)
            .bind(user_id)
            .bind(camera_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn recent_photo(&self, user_id: &str, camera_id: &str) -> Result<Option<Photo>> {
        let query = format!(
            "SELECT {} FROM photos WHERE user_id = ? AND camera_id = ? ORDER BY taken_at DESC LIMIT 1",
            Self::PHOTO_COLUMNS
        );
        let row = sqlx::query_as::<_, PhotoRow>(&query)
            .bind(user_id)
            .bind(camera_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into()))
    }

    async fn insert_marker(&self, marker: &Marker) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO markers (marker_id, user_id, kind, name, lat, lng, camera_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&marker.marker_id)
        .bind(&marker.user_id)
        .bind(marker.kind.as_str())
        .bind(&marker.name)
        .bind(marker.lat)
        .bind(marker.lng)
        .bind(&marker.camera_id)
        .bind(marker.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_markers(&self, user_id: &str) -> Result<Vec<Marker>> {
        let query = format!(
            "SELECT {} FROM markers WHERE user_id = ? ORDER BY created_at",
            Self::MARKER_COLUMNS
        );
        let rows = sqlx::query_as::<_, MarkerRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_marker(&self, user_id: &str, marker_id: &str) -> Result<Option<Marker>> {
        let query = format!(
            "SELECT {} FROM markers WHERE user_id = ? AND marker_id = ?",
            Self::MARKER_COLUMNS
        );
        let row = sqlx::query_as::<_, MarkerRow>(&query)
            .bind(user_id)
            .bind(marker_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into()))
    }

    async fn set_marker_camera(
        &self,
        user_id: &str,
        marker_id: &str,
        camera_id: Option<&str>,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE markers SET camera_id = ? WHERE user_id = ? AND marker_id = ?",
        )
        .bind(camera_id)
        .bind(user_id)
        .bind(marker_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Marker {} not found", marker_id)));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mysql"
    }
}

// ========================================
// Row Types
// ========================================

#[derive(sqlx::FromRow)]
struct PhotoRow {
    user_id: String,
    camera_id: String,
    photo_id: String,
    taken_at: DateTime<Utc>,
    origin_date: Option<DateTime<Utc>>,
    origin_name: Option<String>,
    origin_size: Option<i64>,
    small_url: Option<String>,
    medium_url: Option<String>,
    large_url: Option<String>,
    tags: Json<Vec<String>>,
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Self {
            user_id: row.user_id,
            camera_id: row.camera_id,
            photo_id: row.photo_id,
            taken_at: row.taken_at,
            origin_date: row.origin_date,
            origin_name: row.origin_name,
            origin_size: row.origin_size,
            small_url: row.small_url,
            medium_url: row.medium_url,
            large_url: row.large_url,
            tags: row.tags.0,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MarkerRow {
    marker_id: String,
    user_id: String,
    kind: String,
    name: String,
    lat: f64,
    lng: f64,
    camera_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<MarkerRow> for Marker {
    fn from(row: MarkerRow) -> Self {
        Self {
            marker_id: row.marker_id,
            user_id: row.user_id,
            kind: row.kind.as_str().into(),
            name: row.name,
            lat: row.lat,
            lng: row.lng,
            camera_id: row.camera_id,
            created_at: row.created_at,
        }
    }
}
