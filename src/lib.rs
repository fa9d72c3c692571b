// ==========================================
// 销售看板 - 核心库
// ==========================================
// 流程: 数据源 → 记录规整 → 筛选 → 派生视图 → 导出
// 定位: 只读看板; 不回写、不持久化
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与视图类型
pub mod domain;

// 导入层 - 字段别名、清洗、规整、文件解析
pub mod importer;

// 引擎层 - 筛选与聚合
pub mod engine;

// 数据源层 - 远程接口 / 离线文件
pub mod source;

// 配置层
pub mod config;

// 应用层 - 看板状态
pub mod app;

// API 层 - 看板接口
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    DashboardViews, FilterOptions, GoalShare, MonthCode, PeriodAggregate, RawBatch, RawRecord,
    SalesRecord, Selector, SellerAggregate, SummaryMetrics,
};

// 导入 / 引擎
pub use engine::{FilterSelection, ViewBuilder};
pub use importer::RecordNormalizer;

// 数据源
pub use source::{ApiRecordSource, FileRecordSource, RecordSource};

// 状态 / API
pub use api::{ApiError, ApiResult, DashboardApi};
pub use app::DashboardState;
pub use config::DashboardConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "sales-dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
