// ==========================================
// 销售看板 - 筛选引擎
// ==========================================
// 职责: 年份/销售员/月份三个独立筛选器 + 候选项派生
// 规则: 纯合取; 不存在的组合返回空集,从不报错
// ==========================================

use crate::domain::sales::SalesRecord;
use crate::domain::types::{MonthCode, Selector, ALL_SENTINEL};
use crate::domain::views::FilterOptions;
use std::collections::BTreeSet;

// ==========================================
// FilterSelection - 当前筛选条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub year: Selector<i32>,
    pub seller: Selector<String>,
    pub month: Selector<MonthCode>,
}

impl FilterSelection {
    /// 不限条件
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: Selector<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_seller(mut self, seller: Selector<String>) -> Self {
        self.seller = seller;
        self
    }

    pub fn with_month(mut self, month: Selector<MonthCode>) -> Self {
        self.month = month;
        self
    }

    /// 是否全部为不限
    pub fn is_unconstrained(&self) -> bool {
        self.year.is_all() && self.seller.is_all() && self.month.is_all()
    }

    /// 记录是否满足全部非 "all" 条件
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.year.admits(&record.year)
            && self.seller.admits(&record.seller_name)
            && match &self.month {
                Selector::All => true,
                Selector::Only(month) => record.month() == Some(*month),
            }
    }

    /// 应用筛选（保持原顺序）
    pub fn apply<'a>(&self, records: &'a [SalesRecord]) -> Vec<&'a SalesRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

// ==========================================
// 筛选值解析（外部输入 → Selector）
// ==========================================
// "all"（不区分大小写）或空白 → Selector::All
// 无法解析 → None,由调用方决定如何报告

fn is_all_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL)
}

pub fn parse_year_selector(raw: &str) -> Option<Selector<i32>> {
    if is_all_token(raw) {
        return Some(Selector::All);
    }
    raw.trim().parse::<i32>().ok().map(Selector::Only)
}

pub fn parse_seller_selector(raw: &str) -> Selector<String> {
    if is_all_token(raw) {
        Selector::All
    } else {
        Selector::Only(raw.trim().to_string())
    }
}

pub fn parse_month_selector(raw: &str) -> Option<Selector<MonthCode>> {
    if is_all_token(raw) {
        return Some(Selector::All);
    }
    MonthCode::from_code(&raw.trim().to_uppercase()).map(Selector::Only)
}

// ==========================================
// 候选项派生
// ==========================================

/// 从当前记录集合派生筛选候选项
///
/// # 返回
/// - years: 去重后降序
/// - sellers: 去重后升序,排除空白名称
/// - months: 仅已识别编码,按规范顺序
///
/// 每个列表以 Selector::All 开头
pub fn filter_options(records: &[SalesRecord]) -> FilterOptions {
    let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    let sellers: BTreeSet<&str> = records
        .iter()
        .filter(|r| r.has_seller())
        .map(|r| r.seller_name.as_str())
        .collect();
    let months: BTreeSet<MonthCode> = records.iter().filter_map(|r| r.month()).collect();

    FilterOptions {
        years: std::iter::once(Selector::All)
            .chain(years.into_iter().rev().map(Selector::Only))
            .collect(),
        sellers: std::iter::once(Selector::All)
            .chain(sellers.into_iter().map(|s| Selector::Only(s.to_string())))
            .collect(),
        months: std::iter::once(Selector::All)
            .chain(months.into_iter().map(Selector::Only))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, seller: &str, month: &str) -> SalesRecord {
        SalesRecord {
            id: 1,
            year,
            period: 1,
            month_code: month.to_string(),
            month_label: month.to_string(),
            seller_code: String::new(),
            seller_name: seller.to_string(),
            actual: 0.0,
            goal1: 0.0,
            goal2: 0.0,
            attainment1: 0.0,
            attainment2: 0.0,
            last_updated: String::new(),
        }
    }

    #[test]
    fn test_unconstrained_matches_everything() {
        let records = vec![record(2024, "Ana", "ENE"), record(2023, "", "XYZ")];
        assert_eq!(FilterSelection::all().apply(&records).len(), 2);
    }

    #[test]
    fn test_month_filter_ignores_unrecognized_codes() {
        let records = vec![record(2024, "Ana", "ENE"), record(2024, "Ana", "ENERO")];
        let selection = FilterSelection::all().with_month(Selector::Only(MonthCode::Ene));
        let filtered = selection.apply(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].month_code, "ENE");
    }

    #[test]
    fn test_impossible_combination_is_empty() {
        let records = vec![record(2024, "Ana", "ENE")];
        let selection = FilterSelection::all()
            .with_year(Selector::Only(2024))
            .with_seller(Selector::Only("Beto".to_string()));
        assert!(selection.apply(&records).is_empty());
    }

    #[test]
    fn test_filter_options_ordering() {
        let records = vec![
            record(2023, "Luis", "MAR"),
            record(2024, "Ana", "ENE"),
            record(2024, "  ", "ENERO"),
            record(2022, "Ana", "FEB"),
        ];
        let options = filter_options(&records);

        assert_eq!(
            options.years,
            vec![
                Selector::All,
                Selector::Only(2024),
                Selector::Only(2023),
                Selector::Only(2022)
            ]
        );
        assert_eq!(
            options.sellers,
            vec![
                Selector::All,
                Selector::Only("Ana".to_string()),
                Selector::Only("Luis".to_string())
            ]
        );
        assert_eq!(
            options.months,
            vec![
                Selector::All,
                Selector::Only(MonthCode::Ene),
                Selector::Only(MonthCode::Feb),
                Selector::Only(MonthCode::Mar)
            ]
        );
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!(parse_year_selector("all"), Some(Selector::All));
        assert_eq!(parse_year_selector(" 2024 "), Some(Selector::Only(2024)));
        assert_eq!(parse_year_selector("dos mil"), None);
        assert_eq!(parse_seller_selector("ALL"), Selector::All);
        assert_eq!(parse_seller_selector(" Ana "), Selector::Only("Ana".to_string()));
        assert_eq!(parse_month_selector("feb"), Some(Selector::Only(MonthCode::Feb)));
        assert_eq!(parse_month_selector("febrero"), None);
    }
}
