//! Galerie 错误处理模块
//!
//! 定义库级错误类型

use thiserror::Error;

/// 库级错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 后端返回的业务错误（非 2xx 响应）
    #[error("后端错误 ({status}): {message}")]
    Api { status: u16, message: String },

    /// 网络错误
    #[error("网络错误: {0}")]
    Network(#[from] reqwest::Error),

    /// 响应格式无效
    #[error("响应格式无效: {0}")]
    InvalidResponse(String),

    /// 通用错误
    #[error("{0}")]
    General(String),
}

impl AppError {
    /// 构造后端业务错误
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        AppError::Api {
            status,
            message: message.into(),
        }
    }
}

/// 库级结果类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::api(404, "media introuvable");
        assert_eq!(err.to_string(), "后端错误 (404): media introuvable");
    }

    #[test]
    fn test_general_error_display() {
        let err = AppError::General("oops".to_string());
        assert_eq!(err.to_string(), "oops");
    }
}
