// ==========================================
// 销售看板 - 领域类型定义
// ==========================================
// 月份编码: 封闭枚举 ENE..DIC (西语缩写)
// 筛选器: "all" 哨兵 或 具体取值
// ==========================================

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 筛选器 "不限" 的哨兵取值
pub const ALL_SENTINEL: &str = "all";

// ==========================================
// 月份编码 (Month Code)
// ==========================================
// 顺序即规范顺序,与记录插入顺序无关
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthCode {
    Ene,
    Feb,
    Mar,
    Abr,
    May,
    Jun,
    Jul,
    Ago,
    Sep,
    Oct,
    Nov,
    Dic,
}

impl MonthCode {
    /// 规范顺序的全部月份
    pub const ALL: [MonthCode; 12] = [
        MonthCode::Ene,
        MonthCode::Feb,
        MonthCode::Mar,
        MonthCode::Abr,
        MonthCode::May,
        MonthCode::Jun,
        MonthCode::Jul,
        MonthCode::Ago,
        MonthCode::Sep,
        MonthCode::Oct,
        MonthCode::Nov,
        MonthCode::Dic,
    ];

    /// 三字母大写编码
    pub fn code(self) -> &'static str {
        match self {
            MonthCode::Ene => "ENE",
            MonthCode::Feb => "FEB",
            MonthCode::Mar => "MAR",
            MonthCode::Abr => "ABR",
            MonthCode::May => "MAY",
            MonthCode::Jun => "JUN",
            MonthCode::Jul => "JUL",
            MonthCode::Ago => "AGO",
            MonthCode::Sep => "SEP",
            MonthCode::Oct => "OCT",
            MonthCode::Nov => "NOV",
            MonthCode::Dic => "DIC",
        }
    }

    /// 规范序号（ENE = 1）
    pub fn ordinal(self) -> u32 {
        self as u32 + 1
    }

    /// 从编码识别月份（需已 TRIM + UPPER）
    ///
    /// 未识别的编码返回 None,由调用方决定是否保留原值
    pub fn from_code(code: &str) -> Option<MonthCode> {
        MonthCode::ALL.iter().copied().find(|m| m.code() == code)
    }
}

impl fmt::Display for MonthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ==========================================
// 筛选器 (Selector)
// ==========================================
// All = 不限; Only(v) = 仅匹配 v
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    /// 是否放行给定取值
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => expected == value,
        }
    }
}

impl<T> Selector<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

// 序列化: All → "all", Only(v) → v 本身
impl<T: Serialize> Serialize for Selector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selector::All => serializer.serialize_str(ALL_SENTINEL),
            Selector::Only(v) => v.serialize(serializer),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => write!(f, "{}", ALL_SENTINEL),
            Selector::Only(v) => write!(f, "{}", v),
        }
    }
}
