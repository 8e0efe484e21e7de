//! REST 后端客户端
//!
//! 对接 `/api/admin` 下的媒体与艺术家端点。请求格式与错误体
//! （`{"error": "..."}`）遵循后端现有约定。

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::{Artist, ArtistQuery, Media, MediaPatch, MediaQuery, UploadRequest};
use crate::utils::error::{AppError, AppResult};

use super::auth::AuthContext;
use super::backend::MediaBackend;

/// 后端错误响应体
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// reqwest 实现的媒体后端
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// 创建指向给定服务地址的客户端
    ///
    /// `base_url` 为服务根地址（如 `https://galerie.example`），
    /// 末尾斜杠会被去除。
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// 附加鉴权头
    fn authorize(&self, request: RequestBuilder, auth: &AuthContext) -> RequestBuilder {
        match auth.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// 校验响应状态，非 2xx 解析错误体
    async fn check(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default();
        Err(Self::error_from_body(status, &body))
    }

    /// 把非 2xx 状态码与响应体映射为 [`AppError`]
    ///
    /// 响应体可解析为 `{"error": "..."}` 时使用后端给出的消息，
    /// 否则（HTML 错误页、空体等）退回统一文案。
    fn error_from_body(status: u16, body: &[u8]) -> AppError {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .unwrap_or_else(|| "Unknown error".to_string());
        AppError::api(status, message)
    }

    /// 反序列化 2xx 响应体
    fn decode<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
        serde_json::from_slice(body).map_err(|err| AppError::InvalidResponse(err.to_string()))
    }

    /// 发送请求并反序列化 JSON 响应
    async fn expect_json<T: DeserializeOwned>(request: RequestBuilder) -> AppResult<T> {
        let response = Self::check(request.send().await?).await?;
        let body = response.bytes().await?;
        Self::decode(&body)
    }
}

#[async_trait::async_trait]
impl MediaBackend for HttpBackend {
    async fn list_media(&self, auth: &AuthContext, query: &MediaQuery) -> AppResult<Vec<Media>> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if let Some(folder) = &query.folder {
            params.push(("folder", folder.clone()));
        }
        if let Some(artist_id) = &query.artist_id {
            params.push(("artist_id", artist_id.clone()));
        }

        let request = self
            .authorize(self.client.get(self.url("/admin/media")), auth)
            .query(&params);
        Self::expect_json(request).await
    }

    async fn list_media_folders(&self, auth: &AuthContext) -> AppResult<Vec<String>> {
        let request = self.authorize(self.client.get(self.url("/admin/media/folders")), auth);
        Self::expect_json(request).await
    }

    async fn upload_media(&self, auth: &AuthContext, request: &UploadRequest) -> AppResult<Media> {
        let mut part = Part::bytes(request.bytes.clone()).file_name(request.filename.clone());
        if let Some(content_type) = &request.content_type {
            part = part.mime_str(content_type)?;
        }

        let mut form = Form::new().part("file", part);
        if let Some(alt) = &request.alt {
            form = form.text("alt", alt.clone());
        }
        if let Some(credit) = &request.credit {
            form = form.text("credit", credit.clone());
        }
        if let Some(folder) = &request.folder {
            form = form.text("folder", folder.clone());
        }
        if let Some(artist_id) = &request.artist_id {
            form = form.text("artist_id", artist_id.clone());
        }

        tracing::debug!(filename = %request.filename, "上传媒体文件");
        let builder = self
            .authorize(self.client.post(self.url("/admin/media")), auth)
            .multipart(form);
        Self::expect_json(builder).await
    }

    async fn update_media(
        &self,
        auth: &AuthContext,
        id: &str,
        patch: &MediaPatch,
    ) -> AppResult<Media> {
        let request = self
            .authorize(
                self.client.put(self.url(&format!("/admin/media/{id}"))),
                auth,
            )
            .json(patch);
        Self::expect_json(request).await
    }

    async fn delete_media(&self, auth: &AuthContext, id: &str) -> AppResult<()> {
        let request =
            self.authorize(self.client.delete(self.url(&format!("/admin/media/{id}"))), auth);
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn list_artists(&self, auth: &AuthContext, query: &ArtistQuery) -> AppResult<Vec<Artist>> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if let Some(search) = &query.search {
            params.push(("q", search.clone()));
        }

        let request = self
            .authorize(self.client.get(self.url("/admin/artists")), auth)
            .query(&params);
        Self::expect_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trimmed() {
        let backend = HttpBackend::new("https://galerie.example/");
        assert_eq!(
            backend.url("/admin/media"),
            "https://galerie.example/api/admin/media"
        );
    }

    #[test]
    fn test_error_body_uses_backend_message() {
        let err = HttpBackend::error_from_body(404, br#"{"error":"media introuvable"}"#);
        assert!(
            matches!(err, AppError::Api { status: 404, ref message } if message == "media introuvable")
        );
    }

    #[test]
    fn test_unparseable_error_body_falls_back() {
        let err = HttpBackend::error_from_body(502, b"<html>Bad Gateway</html>");
        assert!(matches!(err, AppError::Api { status: 502, ref message } if message == "Unknown error"));

        // 错误体是 JSON 但没有 error 字段时同样退回统一文案
        let err = HttpBackend::error_from_body(500, br#"{"detail":"boom"}"#);
        assert!(matches!(err, AppError::Api { status: 500, ref message } if message == "Unknown error"));
    }

    #[test]
    fn test_decode_rejects_malformed_success_body() {
        let media = HttpBackend::decode::<Vec<Media>>(b"not json");
        assert!(matches!(media, Err(AppError::InvalidResponse(_))));
    }
}
