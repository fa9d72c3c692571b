// ==========================================
// 销售看板 - 数据源层
// ==========================================
// 职责: 拉取原始批次（远程接口 / 离线文件）
// 红线: 只读,不回写,不持久化
// ==========================================

pub mod api_source;
pub mod error;
pub mod file_source;
pub mod record_source;

pub use api_source::{parse_envelope, ApiRecordSource};
pub use error::{FetchError, FetchResult};
pub use file_source::FileRecordSource;
pub use record_source::RecordSource;

use std::sync::Arc;

/// 根据来源字符串选择数据源（http/https → 接口,否则视为文件路径）
pub fn source_from_location(
    location: &str,
    config: &crate::config::DashboardConfig,
) -> FetchResult<Arc<dyn RecordSource>> {
    let trimmed = location.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let mut config = config.clone();
        config.api_base_url = trimmed.to_string();
        Ok(Arc::new(ApiRecordSource::from_config(&config)?))
    } else {
        Ok(Arc::new(FileRecordSource::new(trimmed)))
    }
}
