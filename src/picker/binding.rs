//! 宿主侧 (ids, previews) 配对与拖拽重排
//!
//! 宿主表单持有一对平行序列：选中 ID 与对应的预览记录。
//! 不变量：`ids.len() == previews.len()` 且 `previews[i].id == ids[i]`。
//! 本模块的所有变更操作都成对进行，任何时刻不破坏该不变量。
//!
//! 重排只对已提交的选择（模态框外的缩略图）有意义，
//! 因此直接作用于宿主持有的配对，而不经过选择器的暂存选择。

use crate::models::Media;

use super::selection::MultiCommit;

/// 宿主持有的有序 (ids, previews) 配对
#[derive(Debug, Clone, Default)]
pub struct MediaBinding {
    ids: Vec<String>,
    previews: Vec<Media>,
}

impl MediaBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由记录列表构造，ID 取自记录本身
    pub fn from_items(items: Vec<Media>) -> Self {
        let ids = items.iter().map(|m| m.id.clone()).collect();
        Self {
            ids,
            previews: items,
        }
    }

    /// 用提交结果整体替换
    pub fn apply_commit(&mut self, commit: MultiCommit) {
        self.ids = commit.ids;
        self.previews = commit.items;
    }

    /// 成对追加
    pub fn push(&mut self, media: Media) {
        self.ids.push(media.id.clone());
        self.previews.push(media);
    }

    /// 成对移除（模态框外的缩略图删除按钮）
    pub fn remove(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|s| s == id) {
            Some(index) => {
                self.ids.remove(index);
                self.previews.remove(index);
                true
            }
            None => false,
        }
    }

    /// 成对移动：从 `from` 取出并插入到 `to`
    ///
    /// 下标越界时不做任何事并返回 false。
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.ids.len() || to >= self.ids.len() {
            return false;
        }
        if from == to {
            return false;
        }
        let id = self.ids.remove(from);
        let preview = self.previews.remove(from);
        self.ids.insert(to, id);
        self.previews.insert(to, preview);
        true
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn previews(&self) -> &[Media] {
        &self.previews
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 不变量探针（测试用）
    pub fn is_aligned(&self) -> bool {
        self.ids.len() == self.previews.len()
            && self
                .ids
                .iter()
                .zip(self.previews.iter())
                .all(|(id, preview)| *id == preview.id)
    }
}

/// 拖拽重排状态机
///
/// Idle -> Dragging（drag-start 记录源下标）；
/// Dragging 中每次经过新下标即成对移动并改跟踪该下标，
/// 使后续 drag-over 事件相对条目的新位置生效（连续重排）；
/// drag-end 无条件回到 Idle。
#[derive(Debug, Clone, Copy, Default)]
pub struct DragReorder {
    active: Option<usize>,
}

impl DragReorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// drag-start：记录被拖条目的当前下标
    pub fn begin(&mut self, source: usize) {
        self.active = Some(source);
    }

    /// drag-over：经过下标 `target` 时成对移动
    ///
    /// 未处于拖拽、经过当前跟踪下标、或下标越界时为空操作。
    /// 返回是否发生了移动。
    pub fn over(&mut self, target: usize, binding: &mut MediaBinding) -> bool {
        let Some(source) = self.active else {
            return false;
        };
        if source == target {
            return false;
        }
        if !binding.move_item(source, target) {
            return false;
        }
        self.active = Some(target);
        true
    }

    /// drag-end（落下或取消）：无条件回到 Idle
    pub fn end(&mut self) {
        self.active = None;
    }

    /// 当前跟踪的下标（拖拽中才有值）
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::sample_media;

    fn binding_of(ids: &[&str]) -> MediaBinding {
        MediaBinding::from_items(ids.iter().map(|id| sample_media(id)).collect())
    }

    #[test]
    fn test_drag_zero_over_one_swaps_both_arrays() {
        // value=[1,2], previews=[P1,P2]，拖 0 过 1 => ([2,1], [P2,P1])
        let mut binding = binding_of(&["1", "2"]);
        let mut drag = DragReorder::new();

        drag.begin(0);
        assert!(drag.over(1, &mut binding));
        drag.end();

        assert_eq!(binding.ids(), ["2", "1"]);
        assert_eq!(binding.previews()[0].id, "2");
        assert_eq!(binding.previews()[1].id, "1");
        assert!(binding.is_aligned());
    }

    #[test]
    fn test_continuous_reorder_tracks_new_position() {
        let mut binding = binding_of(&["a", "b", "c", "d"]);
        let mut drag = DragReorder::new();

        drag.begin(0);
        assert!(drag.over(1, &mut binding));
        assert_eq!(binding.ids(), ["b", "a", "c", "d"]);
        assert_eq!(drag.active(), Some(1));

        assert!(drag.over(3, &mut binding));
        assert_eq!(binding.ids(), ["b", "c", "d", "a"]);
        assert_eq!(drag.active(), Some(3));

        // 拖回中间
        assert!(drag.over(2, &mut binding));
        assert_eq!(binding.ids(), ["b", "c", "a", "d"]);

        drag.end();
        assert!(!drag.is_dragging());
        assert!(binding.is_aligned());
    }

    #[test]
    fn test_same_index_drag_over_is_noop() {
        let mut binding = binding_of(&["a", "b"]);
        let mut drag = DragReorder::new();

        drag.begin(1);
        assert!(!drag.over(1, &mut binding));
        assert_eq!(binding.ids(), ["a", "b"]);
    }

    #[test]
    fn test_drag_over_without_begin_is_noop() {
        let mut binding = binding_of(&["a", "b"]);
        let mut drag = DragReorder::new();
        assert!(!drag.over(0, &mut binding));
        assert_eq!(binding.ids(), ["a", "b"]);
    }

    #[test]
    fn test_out_of_range_target_ignored() {
        let mut binding = binding_of(&["a", "b"]);
        let mut drag = DragReorder::new();
        drag.begin(0);
        assert!(!drag.over(5, &mut binding));
        assert_eq!(drag.active(), Some(0));
        assert!(binding.is_aligned());
    }

    #[test]
    fn test_remove_keeps_pairing() {
        let mut binding = binding_of(&["a", "b", "c"]);
        assert!(binding.remove("b"));
        assert!(!binding.remove("b"));
        assert_eq!(binding.ids(), ["a", "c"]);
        assert!(binding.is_aligned());
    }

    #[test]
    fn test_pairing_invariant_across_operation_sequence() {
        let mut binding = binding_of(&["a", "b", "c", "d", "e"]);
        let mut drag = DragReorder::new();

        binding.remove("c");
        drag.begin(3);
        drag.over(0, &mut binding);
        drag.end();
        binding.push(sample_media("f"));
        drag.begin(2);
        drag.over(4, &mut binding);
        drag.over(1, &mut binding);
        drag.end();

        assert!(binding.is_aligned());
        assert_eq!(binding.len(), 5);
    }

    #[test]
    fn test_apply_commit_replaces_binding_and_keeps_pairing() {
        let mut binding = binding_of(&["old-1", "old-2"]);

        let commit = MultiCommit {
            ids: vec!["n-2".to_string(), "n-1".to_string()],
            items: vec![sample_media("n-2"), sample_media("n-1")],
        };
        binding.apply_commit(commit);

        // 提交结果整体替换宿主侧的 (ids, previews)，保持逐项对齐
        assert_eq!(binding.ids(), ["n-2", "n-1"]);
        assert_eq!(binding.previews()[0].id, "n-2");
        assert!(binding.is_aligned());

        // 替换后的配对继续支持成对操作
        assert!(binding.remove("n-2"));
        assert_eq!(binding.ids(), ["n-1"]);
        assert!(binding.is_aligned());
    }
}
