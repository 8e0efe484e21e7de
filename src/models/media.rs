//! 媒体数据模型
//!
//! 后端以 snake_case JSON 返回媒体记录，字段名与线上格式一一对应。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 媒体记录
///
/// 除 `alt`/`credit`/`folder`/`artist_id` 可通过显式更新修改外，
/// 创建后不可变。`artist_name` 为冗余展示字段，仅在 `artist_id`
/// 存在时由后端一并返回。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    /// 媒体ID（后端分配，整个生命周期内不变）
    pub id: String,
    /// 展示地址
    pub url: String,
    /// 文件名
    pub filename: String,
    /// 替代文本
    pub alt: Option<String>,
    /// 署名
    pub credit: Option<String>,
    /// 宽度（像素）
    pub width: Option<i32>,
    /// 高度（像素）
    pub height: Option<i32>,
    /// 所属目录
    pub folder: Option<String>,
    /// 关联艺术家ID
    pub artist_id: Option<String>,
    /// 艺术家名称（冗余展示字段）
    pub artist_name: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 媒体列表查询参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaQuery {
    pub page: u32,
    pub per_page: u32,
    /// 目录过滤
    pub folder: Option<String>,
    /// 艺术家过滤（精确匹配）
    pub artist_id: Option<String>,
}

impl Default for MediaQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 50,
            folder: None,
            artist_id: None,
        }
    }
}

impl MediaQuery {
    /// 构造仅指定分页的查询
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            ..Self::default()
        }
    }
}

/// 上传请求
///
/// 对应后端 multipart 表单：`file` 为必填，其余字段可选。
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// 原始文件名
    pub filename: String,
    /// MIME 类型（缺省时由后端推断）
    pub content_type: Option<String>,
    /// 文件内容
    pub bytes: Vec<u8>,
    /// 替代文本
    pub alt: Option<String>,
    /// 署名
    pub credit: Option<String>,
    /// 目录
    pub folder: Option<String>,
    /// 上传目标艺术家
    pub artist_id: Option<String>,
}

impl UploadRequest {
    /// 构造仅包含文件内容的上传请求
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes,
            alt: None,
            credit: None,
            folder: None,
            artist_id: None,
        }
    }
}

/// 字段级补丁
///
/// 更新请求中每个字段有三种状态：保持原值（不出现在请求体中）、
/// 显式清空（序列化为 null）、设为新值。`Option<T>` 无法区分
/// 前两种，因此单独建模。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// 保持原值
    #[default]
    Keep,
    /// 清空字段
    Clear,
    /// 设为新值
    Set(T),
}

impl<T> FieldPatch<T> {
    /// 是否保持原值（序列化时跳过）
    pub fn is_keep(&self) -> bool {
        matches!(self, FieldPatch::Keep)
    }
}

impl<T: Serialize> Serialize for FieldPatch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            // Keep 由 skip_serializing_if 跳过；兜底序列化为 null
            FieldPatch::Keep | FieldPatch::Clear => serializer.serialize_none(),
            FieldPatch::Set(value) => value.serialize(serializer),
        }
    }
}

/// 媒体更新补丁
///
/// 对应 `PUT /api/admin/media/{id}` 的请求体。
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaPatch {
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub alt: FieldPatch<String>,
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub credit: FieldPatch<String>,
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub folder: FieldPatch<String>,
    #[serde(skip_serializing_if = "FieldPatch::is_keep")]
    pub artist_id: FieldPatch<String>,
}

impl MediaPatch {
    /// 仅更新替代文本的补丁
    pub fn alt(value: impl Into<String>) -> Self {
        Self {
            alt: FieldPatch::Set(value.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_media_json() -> &'static str {
        r#"{
            "id": "m-1",
            "url": "/uploads/expo.jpg",
            "filename": "expo.jpg",
            "alt": null,
            "credit": "Studio X",
            "width": 1200,
            "height": 800,
            "folder": null,
            "artist_id": "a-1",
            "artist_name": "Duchamp",
            "created_at": "2024-06-01T23:00:00Z"
        }"#
    }

    #[test]
    fn test_media_deserialize() {
        let media: Media = serde_json::from_str(sample_media_json()).unwrap();
        assert_eq!(media.id, "m-1");
        assert_eq!(media.artist_name.as_deref(), Some("Duchamp"));
        assert_eq!(media.created_at.to_rfc3339(), "2024-06-01T23:00:00+00:00");
    }

    #[test]
    fn test_patch_keep_is_absent() {
        let patch = MediaPatch::alt("Vue de l'exposition");
        let value = serde_json::to_value(&patch).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["alt"], "Vue de l'exposition");
    }

    #[test]
    fn test_patch_clear_is_null() {
        let patch = MediaPatch {
            credit: FieldPatch::Clear,
            artist_id: FieldPatch::Set("a-2".to_string()),
            ..MediaPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj["credit"].is_null());
        assert_eq!(obj["artist_id"], "a-2");
    }
}
