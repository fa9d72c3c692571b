// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use sales_dashboard::domain::{RawBatch, RawRecord, SalesRecord};
use serde_json::{json, Value};

// ==========================================
// RawRecord 构建器（按任意键名写入）
// ==========================================

#[derive(Default)]
pub struct RawRecordBuilder {
    fields: RawRecord,
}

impl RawRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// 常用字段: 年份 / 期次 / 月份 / 销售员 / 销售额 / 目标1
    pub fn sale(year: i32, period: i32, month: &str, seller: &str, actual: f64, goal1: f64) -> Self {
        Self::new()
            .field("año", json!(year))
            .field("periodo", json!(period))
            .field("mes", json!(month))
            .field("vendedor", json!(seller))
            .field("ventas", json!(actual))
            .field("meta1", json!(goal1))
    }

    pub fn build(self) -> RawRecord {
        self.fields
    }
}

pub fn batch(records: Vec<RawRecord>) -> RawBatch {
    RawBatch::new(records, "2024-03-01T08:00:00Z".to_string(), "test")
}

// ==========================================
// SalesRecord 构建器
// ==========================================

pub struct SalesRecordBuilder {
    record: SalesRecord,
}

impl SalesRecordBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            record: SalesRecord {
                id,
                year: 2024,
                period: 1,
                month_code: "ENE".to_string(),
                month_label: "ENE".to_string(),
                seller_code: String::new(),
                seller_name: String::new(),
                actual: 0.0,
                goal1: 0.0,
                goal2: 0.0,
                attainment1: 0.0,
                attainment2: 0.0,
                last_updated: "2024-03-01T08:00:00Z".to_string(),
            },
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.record.year = year;
        self
    }

    pub fn period(mut self, period: i32, month: &str) -> Self {
        self.record.period = period;
        self.record.month_code = month.to_string();
        self.record.month_label = month.to_string();
        self
    }

    pub fn seller(mut self, name: &str) -> Self {
        self.record.seller_name = name.to_string();
        self
    }

    /// 销售额与目标1,达成率按比例计算
    pub fn sales(mut self, actual: f64, goal1: f64) -> Self {
        self.record.actual = actual;
        self.record.goal1 = goal1;
        self.record.attainment1 = if goal1 > 0.0 { actual / goal1 * 100.0 } else { 0.0 };
        self
    }

    pub fn goal2(mut self, goal2: f64) -> Self {
        self.record.goal2 = goal2;
        self.record.attainment2 = if goal2 > 0.0 {
            self.record.actual / goal2 * 100.0
        } else {
            0.0
        };
        self
    }

    pub fn build(self) -> SalesRecord {
        self.record
    }
}

/// 近似相等断言
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {} but got {}",
        expected,
        actual
    );
}
