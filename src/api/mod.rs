// ==========================================
// 销售看板 - API 层
// ==========================================
// 职责: 提供看板操作接口,供命令行或其他外壳调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod export;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, RefreshSummary};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use export::{records_file_name, write_records_json, write_views_csv};
