// ==========================================
// 销售看板 - 数据源错误类型
// ==========================================
// 分类: 传输失败 / 非 2xx / 契约违反 / 解码失败 / 离线文件导入失败
// 工具: thiserror 派生宏
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    // ===== 传输失败 =====
    #[error("网络请求失败: {0}")]
    Transport(String),

    #[error("接口返回异常状态码 {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ===== 契约违反 =====
    #[error("接口契约违反: {0}")]
    ContractViolation(String),

    #[error("响应解码失败: {0}")]
    Decode(String),

    // ===== 离线快照 =====
    #[error(transparent)]
    Import(#[from] ImportError),
}

impl FetchError {
    /// 是否为契约违反（success 为假 / data 非数组）
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, FetchError::ContractViolation(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Result 类型别名
pub type FetchResult<T> = Result<T, FetchError>;
