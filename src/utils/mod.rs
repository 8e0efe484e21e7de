//! Galerie 工具模块
//!
//! 包含错误处理等通用工具

pub mod error;

pub use error::*;
