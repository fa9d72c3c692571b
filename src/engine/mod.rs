// ==========================================
// 销售看板 - 引擎层
// ==========================================
// 职责: 筛选 + 派生视图计算
// 红线: 纯函数,不持有状态,不做 I/O
// ==========================================

pub mod aggregation;
pub mod filter;

// 重导出
pub use aggregation::{period_key, ViewBuilder};
pub use filter::{
    filter_options, parse_month_selector, parse_seller_selector, parse_year_selector,
    FilterSelection,
};
