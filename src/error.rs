use thiserror::Error;

use crate::models::responses::ErrorResponse;

/// 应用程序错误类型
///
/// 题目耗尽不是错误，由 [`crate::services::QuizOutcome::Exhausted`] 表示
#[derive(Debug, Error)]
pub enum AppError {
    /// 资源不存在（空页、未知分类、搜索无结果等）
    #[error("资源不存在: {resource}")]
    NotFound { resource: String },

    /// 请求无效（缺少抽题分类、搜索词为空等）
    #[error("请求无效: {reason}")]
    BadRequest { reason: String },

    /// 请求无法处理（新建题目缺少字段、删除不存在的题目等）
    #[error("无法处理: {reason}")]
    Unprocessable { reason: String },

    /// 题库内部错误
    #[error("题库错误: {0}")]
    Store(String),
}

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        AppError::BadRequest {
            reason: reason.into(),
        }
    }

    pub fn unprocessable(reason: impl Into<String>) -> Self {
        AppError::Unprocessable {
            reason: reason.into(),
        }
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::NotFound { .. } => 404,
            AppError::BadRequest { .. } => 400,
            AppError::Unprocessable { .. } => 422,
            AppError::Store(_) => 500,
        }
    }

    /// 对外展示的错误信息
    pub fn message(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "resource not found",
            AppError::BadRequest { .. } => "bad request",
            AppError::Unprocessable { .. } => "unprocessable",
            AppError::Store(_) => "internal server error",
        }
    }

    /// 转换为错误响应体
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: self.status_code(),
            message: self.message().to_string(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        AppError::Store(format!("锁已损坏: {}", err))
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
