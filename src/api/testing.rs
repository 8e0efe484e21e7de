//! In-memory backend for tests.
//!
//! Ships with the crate (like the no-op/logging event sinks the frontends
//! use) so host applications can drive picker sessions in their own tests
//! without a server.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Artist, ArtistQuery, FieldPatch, Media, MediaPatch, MediaQuery, UploadRequest};
use crate::utils::error::{AppError, AppResult};

use super::auth::AuthContext;
use super::backend::MediaBackend;

/// Build a media fixture with the given id and creation time.
pub fn sample_media_at(id: &str, created_at: DateTime<Utc>) -> Media {
    Media {
        id: id.to_string(),
        url: format!("/uploads/{id}.jpg"),
        filename: format!("{id}.jpg"),
        alt: None,
        credit: None,
        width: Some(1200),
        height: Some(800),
        folder: None,
        artist_id: None,
        artist_name: None,
        created_at,
    }
}

/// Build a media fixture dated now.
pub fn sample_media(id: &str) -> Media {
    sample_media_at(id, Utc::now())
}

/// Build an artist fixture.
pub fn sample_artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        published: true,
    }
}

#[derive(Debug, Default)]
struct InnerState {
    media: Vec<Media>,
    artists: Vec<Artist>,
    folders: Vec<String>,
    /// Filenames whose upload should fail.
    failing_uploads: HashSet<String>,
    /// When set, every list call fails.
    fail_lists: bool,
}

/// Scriptable in-memory implementation of [`MediaBackend`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<RwLock<InnerState>>,
    upload_seq: Arc<AtomicU64>,
    list_calls: Arc<AtomicU64>,
    upload_calls: Arc<AtomicU64>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the media store (list order = store order).
    pub fn seed_media(&self, media: Vec<Media>) {
        self.write().media = media;
    }

    pub fn seed_artists(&self, artists: Vec<Artist>) {
        self.write().artists = artists;
    }

    pub fn seed_folders(&self, folders: Vec<String>) {
        self.write().folders = folders;
    }

    /// Make uploads of the given filename fail with a 500.
    pub fn fail_upload_of(&self, filename: impl Into<String>) {
        self.write().failing_uploads.insert(filename.into());
    }

    /// Make every list call fail with a 500.
    pub fn fail_lists(&self, fail: bool) {
        self.write().fail_lists = fail;
    }

    pub fn list_call_count(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn upload_call_count(&self) -> u64 {
        self.upload_calls.load(Ordering::SeqCst)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InnerState> {
        self.inner.write().expect("backend lock poisoned")
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, InnerState> {
        self.inner.read().expect("backend lock poisoned")
    }
}

fn apply_field(target: &mut Option<String>, patch: &FieldPatch<String>) {
    match patch {
        FieldPatch::Keep => {}
        FieldPatch::Clear => *target = None,
        FieldPatch::Set(value) => *target = Some(value.clone()),
    }
}

#[async_trait]
impl MediaBackend for InMemoryBackend {
    async fn list_media(&self, _auth: &AuthContext, query: &MediaQuery) -> AppResult<Vec<Media>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.read();
        if state.fail_lists {
            return Err(AppError::api(500, "list unavailable"));
        }

        let skip = (query.page.saturating_sub(1) * query.per_page) as usize;
        Ok(state
            .media
            .iter()
            .filter(|m| match &query.artist_id {
                Some(artist_id) => m.artist_id.as_deref() == Some(artist_id.as_str()),
                None => true,
            })
            .filter(|m| match &query.folder {
                Some(folder) => m.folder.as_deref() == Some(folder.as_str()),
                None => true,
            })
            .skip(skip)
            .take(query.per_page as usize)
            .cloned()
            .collect())
    }

    async fn list_media_folders(&self, _auth: &AuthContext) -> AppResult<Vec<String>> {
        let state = self.read();
        if state.fail_lists {
            return Err(AppError::api(500, "list unavailable"));
        }
        Ok(state.folders.clone())
    }

    async fn upload_media(&self, _auth: &AuthContext, request: &UploadRequest) -> AppResult<Media> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.write();
        if state.failing_uploads.contains(&request.filename) {
            return Err(AppError::api(500, format!("upload of {} failed", request.filename)));
        }

        let seq = self.upload_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let media = Media {
            id: format!("up-{seq}"),
            url: format!("/uploads/{}", request.filename),
            filename: request.filename.clone(),
            alt: request.alt.clone(),
            credit: request.credit.clone(),
            width: None,
            height: None,
            folder: request.folder.clone(),
            artist_id: request.artist_id.clone(),
            artist_name: None,
            created_at: Utc::now(),
        };
        state.media.insert(0, media.clone());
        Ok(media)
    }

    async fn update_media(
        &self,
        _auth: &AuthContext,
        id: &str,
        patch: &MediaPatch,
    ) -> AppResult<Media> {
        let mut state = self.write();
        let media = state
            .media
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::api(404, "media not found"))?;
        apply_field(&mut media.alt, &patch.alt);
        apply_field(&mut media.credit, &patch.credit);
        apply_field(&mut media.folder, &patch.folder);
        apply_field(&mut media.artist_id, &patch.artist_id);
        if media.artist_id.is_none() {
            media.artist_name = None;
        }
        Ok(media.clone())
    }

    async fn delete_media(&self, _auth: &AuthContext, id: &str) -> AppResult<()> {
        let mut state = self.write();
        let before = state.media.len();
        state.media.retain(|m| m.id != id);
        if state.media.len() == before {
            return Err(AppError::api(404, "media not found"));
        }
        Ok(())
    }

    async fn list_artists(&self, _auth: &AuthContext, query: &ArtistQuery) -> AppResult<Vec<Artist>> {
        let state = self.read();
        if state.fail_lists {
            return Err(AppError::api(500, "list unavailable"));
        }
        Ok(state
            .artists
            .iter()
            .filter(|a| match &query.search {
                Some(search) => a.name.to_lowercase().contains(&search.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_then_list() {
        let backend = InMemoryBackend::new();
        let auth = AuthContext::anonymous();
        backend.seed_media(vec![sample_media("m-1")]);

        let uploaded = backend
            .upload_media(&auth, &UploadRequest::new("vernissage.jpg", vec![1, 2]))
            .await
            .unwrap();
        assert_eq!(uploaded.filename, "vernissage.jpg");

        let listed = backend
            .list_media(&auth, &MediaQuery::page(1, 50))
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, uploaded.id);
    }

    #[tokio::test]
    async fn test_scripted_upload_failure() {
        let backend = InMemoryBackend::new();
        let auth = AuthContext::anonymous();
        backend.fail_upload_of("broken.jpg");

        let err = backend
            .upload_media(&auth, &UploadRequest::new("broken.jpg", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_update_clear_and_set() {
        let backend = InMemoryBackend::new();
        let auth = AuthContext::anonymous();
        let mut media = sample_media("m-1");
        media.credit = Some("Studio X".to_string());
        backend.seed_media(vec![media]);

        let patch = MediaPatch {
            credit: FieldPatch::Clear,
            alt: FieldPatch::Set("Vue".to_string()),
            ..MediaPatch::default()
        };
        let updated = backend.update_media(&auth, "m-1", &patch).await.unwrap();
        assert_eq!(updated.credit, None);
        assert_eq!(updated.alt.as_deref(), Some("Vue"));
    }
}
