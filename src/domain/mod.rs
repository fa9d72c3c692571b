// ==========================================
// 销售看板 - 领域模型层
// ==========================================
// 职责: 定义规范记录、派生视图、领域类型
// 红线: 不含拉取逻辑,不含聚合逻辑
// ==========================================

pub mod sales;
pub mod types;
pub mod views;

// 重导出核心类型
pub use sales::{attainment_percent, RawBatch, RawRecord, SalesRecord};
pub use types::{MonthCode, Selector, ALL_SENTINEL};
pub use views::{
    DashboardViews, FilterOptions, GoalShare, PeriodAggregate, SellerAggregate, SummaryMetrics,
};
