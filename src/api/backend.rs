//! Media backend trait.
//!
//! The picker consumes a small slice of the admin API. Implementations can
//! target the real REST backend ([`HttpBackend`](super::http::HttpBackend))
//! or an in-memory store for testing
//! ([`InMemoryBackend`](super::testing::InMemoryBackend)).

use async_trait::async_trait;

use crate::models::{Artist, ArtistQuery, Media, MediaPatch, MediaQuery, UploadRequest};
use crate::utils::error::AppResult;

use super::auth::AuthContext;

/// Backend operations consumed by the media picker.
///
/// All calls are plain request/response; the trait makes no promise about
/// cancellation. Credentials are passed explicitly per call.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// List media records, newest first.
    async fn list_media(&self, auth: &AuthContext, query: &MediaQuery) -> AppResult<Vec<Media>>;

    /// List the folder names currently in use.
    async fn list_media_folders(&self, auth: &AuthContext) -> AppResult<Vec<String>>;

    /// Upload one file and return the created record.
    async fn upload_media(&self, auth: &AuthContext, request: &UploadRequest) -> AppResult<Media>;

    /// Apply a partial update and return the updated record.
    async fn update_media(
        &self,
        auth: &AuthContext,
        id: &str,
        patch: &MediaPatch,
    ) -> AppResult<Media>;

    /// Delete a media record.
    async fn delete_media(&self, auth: &AuthContext, id: &str) -> AppResult<()>;

    /// List artists (filter facets and upload targets).
    async fn list_artists(&self, auth: &AuthContext, query: &ArtistQuery) -> AppResult<Vec<Artist>>;
}
