// ==========================================
// 销售看板 - API层错误类型
// ==========================================
// 职责: 统一对外错误,转换为用户可见的单条提示
// 红线: 任何错误都不致命; 界面保留最后一次成功的数据
// ==========================================

use crate::i18n::t_with_args;
use crate::source::error::FetchError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 拉取错误
    // ==========================================
    /// 传输失败（网络错误 / 非 2xx / 文件读取失败）
    #[error("数据拉取失败: {0}")]
    FetchFailed(String),

    /// 契约违反（success 为假 / data 非数组）
    #[error("接口契约违反: {0}")]
    ContractViolation(String),

    // ==========================================
    // 业务错误
    // ==========================================
    #[error("无效输入: {field}={value}")]
    InvalidInput { field: String, value: String },

    #[error("导出失败: {0}")]
    ExportFailed(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 稳定错误代码（前端按代码分支）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::FetchFailed(_) => "FETCH_FAILED",
            ApiError::ContractViolation(_) => "CONTRACT_VIOLATION",
            ApiError::InvalidInput { .. } => "INVALID_INPUT",
            ApiError::ExportFailed(_) => "EXPORT_FAILED",
            ApiError::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// 用户可见提示（按当前语言）
    pub fn user_message(&self) -> String {
        match self {
            ApiError::FetchFailed(reason) => {
                t_with_args("error.fetch_failed", &[("reason", reason.as_str())])
            }
            ApiError::ContractViolation(reason) => {
                t_with_args("error.contract_violation", &[("reason", reason.as_str())])
            }
            ApiError::InvalidInput { field, value } => t_with_args(
                "error.invalid_filter",
                &[("field", field.as_str()), ("value", value.as_str())],
            ),
            ApiError::ExportFailed(reason) => {
                t_with_args("error.export_failed", &[("reason", reason.as_str())])
            }
            ApiError::Other(err) => {
                let reason = err.to_string();
                t_with_args("error.internal", &[("reason", reason.as_str())])
            }
        }
    }
}

// ==========================================
// 从 FetchError 转换
// ==========================================
impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::ContractViolation(msg) => ApiError::ContractViolation(msg),
            FetchError::HttpStatus { status, .. } => ApiError::FetchFailed(format!("HTTP {}", status)),
            other => ApiError::FetchFailed(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ExportFailed(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ExportFailed(err.to_string())
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::ExportFailed(err.to_string())
    }
}

// ==========================================
// 错误响应（返回给前端）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,
    /// 错误消息（已本地化）
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.user_message(),
        }
    }
}

/// API Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
