//! 媒体选择器模块
//!
//! 选择器由五部分组成：
//!
//! - `catalog`：单次会话内的媒体快照
//! - `filter`：可见子集与排序的纯函数推导
//! - `selection`：单选 / 有序多选模型
//! - `binding`：宿主持有的 (ids, previews) 配对与拖拽重排
//! - `session`：编排以上各部分的会话控制器

pub mod binding;
pub mod catalog;
pub mod filter;
pub mod selection;
pub mod session;

// 重新导出常用类型
pub use binding::{DragReorder, MediaBinding};
pub use catalog::Catalog;
pub use filter::{visible, DateFilter, FilterState, MediaSort};
pub use selection::{
    MultiCommit, MultiSelection, SelectOutcome, SingleCommit, SingleSelection, ToggleResult,
};
pub use session::{
    CatalogSnapshot, GridState, MediaPicker, MultiMediaPicker, PickerOptions, UploadBatchResult,
    UploadFailure,
};
