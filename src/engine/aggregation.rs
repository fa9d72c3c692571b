// ==========================================
// 销售看板 - 派生视图构建器
// ==========================================
// 职责: 期次聚合 / 销售员排名 / 汇总指标 / 目标占比
// 输入: 已筛选的规范记录
// 红线: 无状态,所有方法都是纯函数; 空集返回全零,从不报错
// ==========================================

use crate::domain::sales::{attainment_percent, SalesRecord};
use crate::domain::views::{
    DashboardViews, GoalShare, PeriodAggregate, SellerAggregate, SummaryMetrics,
};
use std::collections::HashMap;

/// 分组累加器
#[derive(Debug, Clone, Default)]
struct Totals {
    actual: f64,
    goal1: f64,
    goal2: f64,
    count: usize,
}

impl Totals {
    fn add(&mut self, record: &SalesRecord) {
        self.actual += record.actual;
        self.goal1 += record.goal1;
        self.goal2 += record.goal2;
        self.count += 1;
    }
}

/// 期次分组键: 补零期次 + 月份标签
pub fn period_key(period: i32, month_label: &str) -> String {
    format!("{:03}-{}", period, month_label)
}

// ==========================================
// ViewBuilder - 派生视图构建器
// ==========================================
pub struct ViewBuilder;

impl Default for ViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 一次性构建全部视图
    pub fn build<'a, I>(&self, filtered: I) -> DashboardViews
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let records: Vec<&SalesRecord> = filtered.into_iter().collect();
        let summary = self.summary_metrics(records.iter().copied());

        DashboardViews {
            periods: self.period_aggregates(records.iter().copied()),
            sellers: self.seller_ranking(records.iter().copied()),
            goal_share: self.goal_share(&summary),
            filtered_count: records.len(),
            summary,
        }
    }

    /// 期次聚合
    ///
    /// 按 (期次, 月份标签) 分组求和,按期次升序（同期次保持出现顺序）,
    /// 达成率由分组合计重算
    pub fn period_aggregates<'a, I>(&self, filtered: I) -> Vec<PeriodAggregate>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, i32, String, Totals)> = Vec::new();

        for record in filtered {
            let key = period_key(record.period, &record.month_label);
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push((
                    key,
                    record.period,
                    record.month_label.clone(),
                    Totals::default(),
                ));
                groups.len() - 1
            });
            groups[slot].3.add(record);
        }

        // 稳定排序
        groups.sort_by_key(|(_, period, _, _)| *period);

        groups
            .into_iter()
            .map(|(key, period, month_label, totals)| PeriodAggregate {
                key,
                period,
                month_label,
                actual: totals.actual,
                goal1: totals.goal1,
                goal2: totals.goal2,
                attainment1: attainment_percent(totals.actual, totals.goal1),
                attainment2: attainment_percent(totals.actual, totals.goal2),
                record_count: totals.count,
            })
            .collect()
    }

    /// 销售员排名
    ///
    /// 按销售员名称分组求和,按合计销售额降序（并列保持出现顺序）
    pub fn seller_ranking<'a, I>(&self, filtered: I) -> Vec<SellerAggregate>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Totals)> = Vec::new();

        for record in filtered {
            let name = record.seller_name.as_str();
            let slot = *index.entry(name).or_insert_with(|| {
                groups.push((name, Totals::default()));
                groups.len() - 1
            });
            groups[slot].1.add(record);
        }

        let mut rows: Vec<SellerAggregate> = groups
            .into_iter()
            .map(|(name, totals)| SellerAggregate {
                seller_name: name.to_string(),
                actual: totals.actual,
                goal1: totals.goal1,
                goal2: totals.goal2,
                attainment1: attainment_percent(totals.actual, totals.goal1),
                attainment2: attainment_percent(totals.actual, totals.goal2),
                record_count: totals.count,
            })
            .collect();

        // sort_by 为稳定排序
        rows.sort_by(|a, b| b.actual.total_cmp(&a.actual));
        rows
    }

    /// 汇总指标
    ///
    /// - attainment1/2: sum(actual) / sum(goal) * 100
    /// - avg_attainment1/2: 单条达成率 > 0 的记录的算术平均
    pub fn summary_metrics<'a, I>(&self, filtered: I) -> SummaryMetrics
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut totals = Totals::default();
        let (mut sum_att1, mut n_att1) = (0.0, 0usize);
        let (mut sum_att2, mut n_att2) = (0.0, 0usize);

        for record in filtered {
            totals.add(record);
            if record.attainment1 > 0.0 {
                sum_att1 += record.attainment1;
                n_att1 += 1;
            }
            if record.attainment2 > 0.0 {
                sum_att2 += record.attainment2;
                n_att2 += 1;
            }
        }

        SummaryMetrics {
            total_actual: totals.actual,
            total_goal1: totals.goal1,
            total_goal2: totals.goal2,
            attainment1: attainment_percent(totals.actual, totals.goal1),
            attainment2: attainment_percent(totals.actual, totals.goal2),
            avg_attainment1: mean(sum_att1, n_att1),
            avg_attainment2: mean(sum_att2, n_att2),
            record_count: totals.count,
        }
    }

    /// 目标1/目标2 占比（%）
    pub fn goal_share(&self, summary: &SummaryMetrics) -> GoalShare {
        let total = summary.total_goal1 + summary.total_goal2;
        let (goal1_share, goal2_share) = if total > 0.0 {
            (
                summary.total_goal1 / total * 100.0,
                summary.total_goal2 / total * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        GoalShare {
            goal1: summary.total_goal1,
            goal2: summary.total_goal2,
            goal1_share,
            goal2_share,
        }
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
