//! 艺术家数据模型
//!
//! 选择器只在两处用到艺术家：过滤面板的候选列表与上传目标。
//! 这里只保留这两种用途需要的字段。

use serde::{Deserialize, Serialize};

/// 艺术家
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// 艺术家ID
    pub id: String,
    /// 名称
    pub name: String,
    /// URL 标识
    pub slug: String,
    /// 是否已发布
    pub published: bool,
}

/// 艺术家列表查询参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistQuery {
    /// 名称搜索
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for ArtistQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            per_page: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_deserialize() {
        let artist: Artist = serde_json::from_str(
            r#"{"id":"a-1","name":"Duchamp","slug":"duchamp","published":true}"#,
        )
        .unwrap();
        assert_eq!(artist.name, "Duchamp");
        assert!(artist.published);
    }
}
