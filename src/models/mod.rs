//! Galerie 数据模型模块
//!
//! 包含媒体库及其查询参数的数据结构定义

pub mod artist;
pub mod media;

// 重新导出常用类型
pub use artist::{Artist, ArtistQuery};
pub use media::{FieldPatch, Media, MediaPatch, MediaQuery, UploadRequest};
