// ==========================================
// 销售看板 - 记录规整器
// ==========================================
// 职责: RawRecord → SalesRecord（一进一出,永不失败）
// 流程: 别名查找 → 清洗/数值强转 → 回退默认值 → 达成率补算
// ==========================================

use crate::domain::sales::{attainment_percent, RawBatch, RawRecord, SalesRecord};
use crate::domain::types::MonthCode;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::field_mapper::{CanonicalField, FieldMapper};
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use chrono::Datelike;

/// 批次规整统计（仅用于日志）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeStats {
    pub records: usize,
    pub derived_attainment: usize,
    pub unrecognized_months: usize,
    pub defaulted_years: usize,
    pub positional_ids: usize,
    pub clamped_actuals: usize,
}

pub struct RecordNormalizer {
    mapper: FieldMapper,
    cleaner: DataCleaner,
    /// 年份缺失时的回退值（默认当前年份）
    default_year: i32,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordNormalizer {
    pub fn new() -> Self {
        Self::with_default_year(chrono::Local::now().year())
    }

    pub fn with_default_year(default_year: i32) -> Self {
        Self {
            mapper: FieldMapper,
            cleaner: DataCleaner,
            default_year,
        }
    }

    /// 规整单条记录
    ///
    /// # 参数
    /// - raw: 原始记录
    /// - index: 批次内位置（id 缺失时生成 index + 1）
    /// - batch_timestamp: 批次时间戳（更新时间缺失时回退）
    pub fn normalize(&self, raw: &RawRecord, index: usize, batch_timestamp: &str) -> SalesRecord {
        self.normalize_tracked(raw, index, batch_timestamp, &mut NormalizeStats::default())
    }

    /// 规整整个批次（顺序与输入一致）
    pub fn normalize_batch(&self, batch: &RawBatch) -> Vec<SalesRecord> {
        let mut stats = NormalizeStats::default();
        let records: Vec<SalesRecord> = batch
            .records
            .iter()
            .enumerate()
            .map(|(index, raw)| self.normalize_tracked(raw, index, &batch.timestamp, &mut stats))
            .collect();

        tracing::info!(
            batch_id = %batch.batch_id,
            records = stats.records,
            derived_attainment = stats.derived_attainment,
            unrecognized_months = stats.unrecognized_months,
            defaulted_years = stats.defaulted_years,
            positional_ids = stats.positional_ids,
            clamped_actuals = stats.clamped_actuals,
            "批次规整完成"
        );

        records
    }

    fn normalize_tracked(
        &self,
        raw: &RawRecord,
        index: usize,
        batch_timestamp: &str,
        stats: &mut NormalizeStats,
    ) -> SalesRecord {
        stats.records += 1;

        // 1. 标识
        let id = match self.number(raw, CanonicalField::Id) {
            v if v >= 1.0 => v as i64,
            _ => {
                stats.positional_ids += 1;
                index as i64 + 1
            }
        };

        let year = match self.number(raw, CanonicalField::Year) {
            v if v >= 1.0 => v as i32,
            _ => {
                stats.defaulted_years += 1;
                self.default_year
            }
        };

        let period = self.number(raw, CanonicalField::Period) as i32;

        // 2. 月份（未识别编码保留在记录上）
        let month_code = self
            .cleaner
            .normalize_month_code(self.mapper.lookup(raw, CanonicalField::MonthCode));
        if MonthCode::from_code(&month_code).is_none() {
            stats.unrecognized_months += 1;
            tracing::debug!(index, month_code = %month_code, "未识别的月份编码");
        }
        let month_label = self
            .text(raw, CanonicalField::MonthLabel)
            .unwrap_or_else(|| month_code.clone());

        // 3. 销售员
        let seller_code = self.text(raw, CanonicalField::SellerCode).unwrap_or_default();
        let seller_name = self.text(raw, CanonicalField::SellerName).unwrap_or_default();

        // 4. 金额
        // 销售额不为负: 负值按 0 处理
        let actual = match self.number(raw, CanonicalField::Actual) {
            v if v < 0.0 => {
                stats.clamped_actuals += 1;
                tracing::debug!(index, actual = v, "销售额为负,按 0 处理");
                0.0
            }
            v => v,
        };
        let goal1 = self.number(raw, CanonicalField::Goal1);
        let goal2 = self.number(raw, CanonicalField::Goal2);

        // 5. 达成率: 源值为 0 且目标为正时补算
        let attainment1 =
            self.resolve_attainment(raw, CanonicalField::Attainment1, actual, goal1, stats);
        let attainment2 =
            self.resolve_attainment(raw, CanonicalField::Attainment2, actual, goal2, stats);

        let last_updated = self
            .text(raw, CanonicalField::LastUpdated)
            .unwrap_or_else(|| batch_timestamp.to_string());

        SalesRecord {
            id,
            year,
            period,
            month_code,
            month_label,
            seller_code,
            seller_name,
            actual,
            goal1,
            goal2,
            attainment1,
            attainment2,
            last_updated,
        }
    }

    fn resolve_attainment(
        &self,
        raw: &RawRecord,
        field: CanonicalField,
        actual: f64,
        goal: f64,
        stats: &mut NormalizeStats,
    ) -> f64 {
        let supplied = self.number(raw, field);
        if supplied == 0.0 && goal > 0.0 {
            stats.derived_attainment += 1;
            attainment_percent(actual, goal)
        } else {
            supplied
        }
    }

    fn number(&self, raw: &RawRecord, field: CanonicalField) -> f64 {
        self.cleaner.safe_number(self.mapper.lookup(raw, field))
    }

    fn text(&self, raw: &RawRecord, field: CanonicalField) -> Option<String> {
        self.mapper
            .lookup(raw, field)
            .and_then(|v| self.cleaner.value_to_text(v))
    }
}
