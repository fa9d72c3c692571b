// ==========================================
// 销售看板 - 导入 Trait
// ==========================================
// 职责: 定义导入接口（不包含实现）
// ==========================================

use crate::domain::sales::RawRecord;
use crate::importer::error::ImportResult;
use serde_json::Value;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 离线快照文件解析
// 实现者: JsonParser, CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始记录列表
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<RawRecord>): 原始记录（表头/键名原样保留）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单个字段值的清洗与数值强转
// 实现者: DataCleanerImpl
// 红线: 永不失败,一切脏值均有回退
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM,可选 UPPER）
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// 标量值转文本（字符串/数字/布尔）,空白视为 None
    fn value_to_text(&self, value: &Value) -> Option<String>;

    /// 安全数值转换
    ///
    /// # 说明
    /// - 原生数字原样返回（非有限值 → 0）
    /// - 本地化字符串: 去空白/货币符号/千分位,统一小数点后解析
    /// - 任何无法解析的输入 → 0
    fn safe_number(&self, value: Option<&Value>) -> f64;

    /// 月份编码标准化（TRIM + UPPER,未识别编码原样保留）
    fn normalize_month_code(&self, value: Option<&Value>) -> String;
}
