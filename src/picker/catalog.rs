//! 会话内媒体快照
//!
//! 选择器打开时由一次列表请求填充，会话内上传的条目前插，
//! 关闭后整体丢弃。快照保持抓取顺序，展示顺序由过滤排序引擎另行推导。

use crate::models::Media;

/// 单次选择器会话的媒体快照
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Media>,
}

impl Catalog {
    /// 创建空快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 用一次抓取结果整体替换快照内容
    pub fn replace(&mut self, items: Vec<Media>) {
        self.items = items;
    }

    /// 前插一条记录（上传成功后调用）
    ///
    /// 同 ID 的旧记录会被移除，避免快照中出现重复。
    pub fn prepend(&mut self, media: Media) {
        self.items.retain(|m| m.id != media.id);
        self.items.insert(0, media);
    }

    /// 按 ID 查找
    pub fn get(&self, id: &str) -> Option<&Media> {
        self.items.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// 移除一条记录，返回是否存在
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|m| m.id != id);
        self.items.len() != before
    }

    /// 用更新后的记录替换旧记录，返回是否找到
    pub fn apply_update(&mut self, media: Media) -> bool {
        match self.items.iter_mut().find(|m| m.id == media.id) {
            Some(slot) => {
                *slot = media;
                true
            }
            None => false,
        }
    }

    /// 按抓取顺序访问全部条目
    pub fn items(&self) -> &[Media] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
