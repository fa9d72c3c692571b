// ==========================================
// 销售看板 - 派生视图
// ==========================================
// 全部为重算值,从不回写到 SalesRecord
// 序列化格式: camelCase（供前端图表直接消费）
// ==========================================

use crate::domain::types::{MonthCode, Selector};
use serde::Serialize;

// ==========================================
// PeriodAggregate - 期次聚合行
// ==========================================
// 一行对应一个 (period, month_label) 组合
// 达成率由合计值重算,不是单条达成率的平均
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAggregate {
    /// 分组键: 补零期次 + 月份标签
    pub key: String,
    pub period: i32,
    pub month_label: String,
    pub actual: f64,
    pub goal1: f64,
    pub goal2: f64,
    pub attainment1: f64,
    pub attainment2: f64,
    pub record_count: usize,
}

// ==========================================
// SellerAggregate - 销售员排名行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerAggregate {
    pub seller_name: String,
    pub actual: f64,
    pub goal1: f64,
    pub goal2: f64,
    pub attainment1: f64,
    pub attainment2: f64,
    pub record_count: usize,
}

// ==========================================
// SummaryMetrics - 全局汇总指标
// ==========================================
// attainment*: 合计口径（sum(actual) / sum(goal)）,用于头部 KPI
// avg_attainment*: 单条达成率的均值,仅统计达成率 > 0 的记录
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_actual: f64,
    pub total_goal1: f64,
    pub total_goal2: f64,
    pub attainment1: f64,
    pub attainment2: f64,
    pub avg_attainment1: f64,
    pub avg_attainment2: f64,
    #[serde(rename = "registros")]
    pub record_count: usize,
}

// ==========================================
// GoalShare - 目标1/目标2 占比（双扇区饼图）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalShare {
    pub goal1: f64,
    pub goal2: f64,
    pub goal1_share: f64,
    pub goal2_share: f64,
}

// ==========================================
// FilterOptions - 筛选下拉候选项
// ==========================================
// 每个列表首项均为 Selector::All
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// 年份（降序）
    pub years: Vec<Selector<i32>>,
    /// 销售员名称（升序,排除空白）
    pub sellers: Vec<Selector<String>>,
    /// 月份（仅已识别编码,按规范顺序）
    pub months: Vec<Selector<MonthCode>>,
}

// ==========================================
// DashboardViews - 交给展示层的视图集合
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViews {
    pub periods: Vec<PeriodAggregate>,
    pub sellers: Vec<SellerAggregate>,
    pub summary: SummaryMetrics,
    pub goal_share: GoalShare,
    pub filtered_count: usize,
}
