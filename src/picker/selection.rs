//! 选择模型
//!
//! 单选与有序多选。选中顺序是业务语义的一部分（下游作为画廊展示
//! 顺序），与快照抓取顺序、过滤排序顺序相互独立。
//!
//! 提交时按快照解析选中 ID；解析失败的 ID 静默丢弃：条目可能在
//! 抓取与提交之间被并发删除，这是预期情形而非错误。

use crate::models::Media;

use super::catalog::Catalog;

/// 多选 toggle 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleResult {
    /// 追加到末尾，`position` 为追加后的下标
    Added { position: usize },
    /// 从选择中移除，其余顺序不变
    Removed,
}

/// 单选 select 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// 选中项发生变化
    Selected,
    /// 重复点击当前选中项，不做任何事
    AlreadySelected,
}

/// 单选提交结果
#[derive(Debug, Clone, Default)]
pub struct SingleCommit {
    pub id: Option<String>,
    pub item: Option<Media>,
}

/// 多选提交结果
///
/// 两个序列保持配对：`ids.len() == items.len()` 且
/// `items[i].id == ids[i]`。
#[derive(Debug, Clone, Default)]
pub struct MultiCommit {
    pub ids: Vec<String>,
    pub items: Vec<Media>,
}

/// 单选模型
#[derive(Debug, Clone, Default)]
pub struct SingleSelection {
    id: Option<String>,
}

impl SingleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用宿主当前值初始化
    pub fn seed(&mut self, id: Option<String>) {
        self.id = id;
    }

    /// 选中一项；重复点击当前项为空操作
    pub fn select(&mut self, id: &str) -> SelectOutcome {
        if self.id.as_deref() == Some(id) {
            return SelectOutcome::AlreadySelected;
        }
        self.id = Some(id.to_string());
        SelectOutcome::Selected
    }

    /// 显式清空
    pub fn clear(&mut self) {
        self.id = None;
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// 按快照解析为提交结果
    pub fn resolve(&self, catalog: &Catalog) -> SingleCommit {
        let item = self.id.as_deref().and_then(|id| catalog.get(id)).cloned();
        let id = item.as_ref().map(|m| m.id.clone());
        if self.id.is_some() && id.is_none() {
            tracing::debug!(id = ?self.id, "选中项已不在快照中，按空提交");
        }
        SingleCommit { id, item }
    }
}

/// 有序多选模型
///
/// ID 有序且不重复。
#[derive(Debug, Clone, Default)]
pub struct MultiSelection {
    ids: Vec<String>,
}

impl MultiSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用宿主当前值初始化（去重，保留首次出现的位置）
    pub fn seed(&mut self, ids: &[String]) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(id) {
                self.ids.push(id.clone());
            }
        }
    }

    /// 切换一项：不在则追加到末尾，在则移除且不影响其余顺序
    pub fn toggle(&mut self, id: &str) -> ToggleResult {
        if let Some(index) = self.position(id) {
            self.ids.remove(index);
            return ToggleResult::Removed;
        }
        self.ids.push(id.to_string());
        ToggleResult::Added {
            position: self.ids.len() - 1,
        }
    }

    /// 并入一批可见 ID（保序集合并集）
    ///
    /// 已选中的保持原位置，新 ID 按传入顺序追加。返回新增数量。
    pub fn select_all<I>(&mut self, visible_ids: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for id in visible_ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
                added += 1;
            }
        }
        added
    }

    /// 清空选择
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// 移除一项（若存在），其余顺序不变
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// 选中顺序中的下标
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 按快照解析为提交结果
    ///
    /// filter-map 语义：解析失败的 ID 丢弃并记录 debug 日志，
    /// 产出的 (ids, items) 满足配对不变量。
    pub fn resolve(&self, catalog: &Catalog) -> MultiCommit {
        let mut ids = Vec::with_capacity(self.ids.len());
        let mut items = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            match catalog.get(id) {
                Some(media) => {
                    ids.push(id.clone());
                    items.push(media.clone());
                }
                None => {
                    tracing::debug!(%id, "选中项已不在快照中，提交时丢弃");
                }
            }
        }
        MultiCommit { ids, items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::sample_media;

    fn catalog_of(ids: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.replace(ids.iter().map(|id| sample_media(id)).collect());
        catalog
    }

    #[test]
    fn test_single_reselect_is_noop() {
        let mut selection = SingleSelection::new();
        assert_eq!(selection.select("m-1"), SelectOutcome::Selected);
        assert_eq!(selection.select("m-1"), SelectOutcome::AlreadySelected);
        assert_eq!(selection.id(), Some("m-1"));

        assert_eq!(selection.select("m-2"), SelectOutcome::Selected);
        assert_eq!(selection.id(), Some("m-2"));

        selection.clear();
        assert_eq!(selection.id(), None);
    }

    #[test]
    fn test_single_resolve_missing_id() {
        let mut selection = SingleSelection::new();
        selection.seed(Some("gone".to_string()));
        let commit = selection.resolve(&catalog_of(&["m-1"]));
        assert!(commit.id.is_none());
        assert!(commit.item.is_none());
    }

    #[test]
    fn test_toggle_appends_and_removes_in_order() {
        let mut selection = MultiSelection::new();
        assert_eq!(selection.toggle("a"), ToggleResult::Added { position: 0 });
        assert_eq!(selection.toggle("b"), ToggleResult::Added { position: 1 });
        assert_eq!(selection.toggle("c"), ToggleResult::Added { position: 2 });

        assert_eq!(selection.toggle("b"), ToggleResult::Removed);
        assert_eq!(selection.ids(), ["a", "c"]);
    }

    #[test]
    fn test_toggle_twice_restores_exact_state() {
        let mut selection = MultiSelection::new();
        selection.seed(&["a".to_string(), "c".to_string()]);
        let before = selection.ids().to_vec();

        selection.toggle("x");
        selection.toggle("x");
        assert_eq!(selection.ids(), before.as_slice());
    }

    #[test]
    fn test_toggle_selected_then_back_appends_at_end() {
        // 已选中项的两次 toggle：移除后重新追加到末尾
        let mut selection = MultiSelection::new();
        selection.seed(&["a".to_string(), "b".to_string(), "c".to_string()]);

        selection.toggle("b");
        assert_eq!(selection.ids(), ["a", "c"]);
        selection.toggle("b");
        assert_eq!(selection.ids(), ["a", "c", "b"]);
    }

    #[test]
    fn test_select_all_is_order_preserving_union() {
        let mut selection = MultiSelection::new();
        selection.seed(&["c".to_string(), "a".to_string()]);

        let added = selection.select_all(["a", "b", "c", "d"].into_iter().map(String::from));
        assert_eq!(added, 2);
        // 已有成员保位，新成员按可见顺序追加
        assert_eq!(selection.ids(), ["c", "a", "b", "d"]);
    }

    #[test]
    fn test_seed_dedupes() {
        let mut selection = MultiSelection::new();
        selection.seed(&["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(selection.ids(), ["a", "b"]);
    }

    #[test]
    fn test_resolve_drops_dangling_ids() {
        let mut selection = MultiSelection::new();
        selection.seed(&["a".to_string(), "b".to_string()]);

        // 快照中已无 "b"（模拟抓取与提交之间被并发删除）
        let commit = selection.resolve(&catalog_of(&["a"]));
        assert_eq!(commit.ids, ["a"]);
        assert_eq!(commit.items.len(), 1);
        assert_eq!(commit.items[0].id, "a");
    }

    #[test]
    fn test_resolve_preserves_selection_order() {
        let mut selection = MultiSelection::new();
        selection.seed(&["b".to_string(), "a".to_string()]);
        let commit = selection.resolve(&catalog_of(&["a", "b"]));
        assert_eq!(commit.ids, ["b", "a"]);
        assert_eq!(commit.items[0].id, "b");
        assert_eq!(commit.items[1].id, "a");
    }
}
