// ==========================================
// 销售看板 - 导入层
// ==========================================
// 职责: 原始记录 → 规范记录
// 支持: 远程接口批次 / JSON / CSV / Excel 快照
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod normalizer;

// 重导出核心类型
pub use data_cleaner::{parse_localized_number, DataCleaner as DataCleanerImpl};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{CanonicalField, FieldMapper};
pub use file_parser::{collect_raw_records, CsvParser, ExcelParser, JsonParser, UniversalFileParser};
pub use normalizer::{NormalizeStats, RecordNormalizer};

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, FileParser};

use serde_json::Value;

/// 安全数值转换（便捷入口）
pub fn safe_number(value: &Value) -> f64 {
    DataCleanerImpl.safe_number(Some(value))
}
