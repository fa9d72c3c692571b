// ==========================================
// 销售看板 - 配置管理器
// ==========================================
// 职责: 配置加载（默认值 → JSON 文件 → 环境变量覆写）
// 存储: {config_dir}/sales-dashboard/config.json（可选）
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "SALES_DASHBOARD_CONFIG";
    /// 接口根地址
    pub const API_URL: &str = "SALES_DASHBOARD_API_URL";
    /// 请求超时（秒）
    pub const TIMEOUT_SECS: &str = "SALES_DASHBOARD_TIMEOUT_SECS";
    /// 导出目录
    pub const EXPORT_DIR: &str = "SALES_DASHBOARD_EXPORT_DIR";
    /// 界面语言
    pub const LOCALE: &str = "SALES_DASHBOARD_LOCALE";
}

/// 默认接口根地址
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 默认语言
pub const DEFAULT_LOCALE: &str = "es";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// DashboardConfig - 看板配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 接口根地址（请求 {api_base_url}/ventas）
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 导出目录
    pub export_dir: PathBuf,
    /// 界面语言（es / en / zh-CN）
    pub locale: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            export_dir: default_export_dir(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// 加载配置（进程环境）
    ///
    /// # 顺序
    /// 1. 默认值
    /// 2. 配置文件（SALES_DASHBOARD_CONFIG 或默认路径,不存在则跳过）
    /// 3. 环境变量覆写
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// 加载配置（注入环境变量读取函数,便于测试）
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(config_keys::CONFIG_PATH)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);

        let mut config = if path.exists() {
            tracing::info!("读取配置文件: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("配置文件不存在,使用默认配置: {}", path.display());
            Self::default()
        };

        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// 从 JSON 文件读取（缺失字段取默认值）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = read(config_keys::API_URL) {
            self.api_base_url = url;
        }

        if let Some(raw) = read(config_keys::TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                ConfigError::ValueError {
                    key: config_keys::TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                    message: "必须为正整数".to_string(),
                }
            })?;
            self.request_timeout_secs = secs;
        }

        if let Some(dir) = read(config_keys::EXPORT_DIR) {
            self.export_dir = PathBuf::from(dir);
        }

        if let Some(locale) = read(config_keys::LOCALE) {
            self.locale = locale;
        }

        Ok(())
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("sales-dashboard"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// 默认导出目录（下载目录,取不到则当前目录）
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
