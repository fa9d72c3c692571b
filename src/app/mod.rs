// ==========================================
// 销售看板 - 应用层
// ==========================================
// 职责: 看板状态与刷新序号管理
// ==========================================

pub mod state;

// 重导出
pub use state::{DashboardState, RefreshOutcome, RefreshTicket};
