// ==========================================
// 销售看板 - 销售记录实体
// ==========================================
// RawRecord: 外部原始记录（字段名/大小写不保证）
// SalesRecord: 规整后的规范记录,会话内唯一事实来源
// ==========================================

use crate::domain::types::MonthCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 外部原始记录（JSON 对象,键名不受约束）
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

// ==========================================
// RawBatch - 一次拉取的原始批次
// ==========================================
#[derive(Debug, Clone)]
pub struct RawBatch {
    /// 批次ID（日志追踪用）
    pub batch_id: Uuid,
    /// 原始记录
    pub records: Vec<RawRecord>,
    /// 批次时间戳（记录缺少更新时间时的回退值）
    pub timestamp: String,
    /// 数据来源描述（URL 或文件路径）
    pub source: String,
}

impl RawBatch {
    pub fn new(records: Vec<RawRecord>, timestamp: String, source: impl Into<String>) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            records,
            timestamp,
            source: source.into(),
        }
    }
}

// ==========================================
// SalesRecord - 规范销售记录
// ==========================================
// 序列化键 = 各字段别名表的首个别名,导出文件可被原样重新导入
// 规整后不可变; 派生视图不回写到记录上
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "id")]
    pub id: i64,

    #[serde(rename = "año")]
    pub year: i32,

    /// 数据集内的期次序号（不等同于自然月）
    #[serde(rename = "periodo")]
    pub period: i32,

    /// 月份编码（TRIM + UPPER,未识别编码原样保留）
    #[serde(rename = "mes")]
    pub month_code: String,

    #[serde(rename = "mes_nombre")]
    pub month_label: String,

    #[serde(rename = "cod_vendedor")]
    pub seller_code: String,

    /// 排名分组键
    #[serde(rename = "vendedor")]
    pub seller_name: String,

    #[serde(rename = "ventas")]
    pub actual: f64,

    #[serde(rename = "meta1")]
    pub goal1: f64,

    #[serde(rename = "meta2")]
    pub goal2: f64,

    /// 达成率1（%）: 源值或 actual / goal1 * 100
    #[serde(rename = "cumplimiento1")]
    pub attainment1: f64,

    /// 达成率2（%）: 源值或 actual / goal2 * 100
    #[serde(rename = "cumplimiento2")]
    pub attainment2: f64,

    #[serde(rename = "ultima_actualizacion")]
    pub last_updated: String,
}

impl SalesRecord {
    /// 已识别的月份（未识别编码返回 None）
    pub fn month(&self) -> Option<MonthCode> {
        MonthCode::from_code(&self.month_code)
    }

    /// 销售员名称是否为空白
    pub fn has_seller(&self) -> bool {
        !self.seller_name.trim().is_empty()
    }
}

/// 达成率（%）: actual / goal * 100
///
/// goal <= 0 或结果非有限值时返回 0（不产生 NaN / 无穷大）
pub fn attainment_percent(actual: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    let ratio = actual / goal * 100.0;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}
