// ==========================================
// 销售看板 - 配置层
// ==========================================
// 职责: 接口地址、超时、导出目录、语言
// 来源: 默认值 → JSON 文件 → 环境变量
// ==========================================

pub mod config_manager;

// 重导出核心配置类型
pub use config_manager::{
    config_keys, default_config_path, default_export_dir, ConfigError, DashboardConfig,
};
