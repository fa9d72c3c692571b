// ==========================================
// 销售看板 - 数据清洗器实现
// ==========================================
// 职责: TRIM / UPPER / NULL 标准化 / 本地化数值强转
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use serde_json::Value;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn value_to_text(&self, value: &Value) -> Option<String> {
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn safe_number(&self, value: Option<&Value>) -> f64 {
        match value {
            Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
            Some(Value::String(s)) => parse_localized_number(s).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    fn normalize_month_code(&self, value: Option<&Value>) -> String {
        value
            .and_then(|v| self.value_to_text(v))
            .map(|v| self.clean_text(&v, true))
            .unwrap_or_default()
    }
}

/// 解析本地化数值字符串
///
/// # 规则
/// 1. 保留数字与 `. , - +`,去除空白、货币符号、百分号以及数字之外的前后缀
/// 2. 前为数字、后为数字或符号加数字的 `e`/`E` 视为指数标记; 其余夹在数字之间的字母 → None
/// 3. 分隔符只在尾数中判定:
///    - 同时出现 `.` 与 `,`: 后出现者为小数点,另一个为千分位
///    - 仅出现 `,`: 单个为小数点,多个为千分位
///    - 仅出现 `.`: 多个为千分位; 单个且整数部分为 1-3 位非零、小数部分恰为 3 位时为千分位
///      （带指数时单个 `.` 一律为小数点）
///
/// # 示例
/// - "$ 1.234.567,89" → 1234567.89
/// - "1.000.000" → 1000000
/// - "1.5e3" → 1500
/// - "-" / "" / "12abc34" → None
pub fn parse_localized_number(raw: &str) -> Option<f64> {
    let chars: Vec<char> = raw.chars().collect();
    let mut mantissa = String::new();
    let mut exponent: Option<String> = None;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+') {
            match exponent.as_mut() {
                Some(exp) => exp.push(c),
                None => mantissa.push(c),
            }
        } else if c.is_alphabetic() && has_digit(&chars[..i]) && has_digit(&chars[i + 1..]) {
            if exponent.is_none() && is_exponent_marker(&chars, i) {
                exponent = Some(String::new());
            } else {
                return None;
            }
        }
    }

    if !mantissa.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = resolve_separators(&mantissa, exponent.is_some());
    let text = match exponent {
        Some(exp) => {
            exp.parse::<i32>().ok()?;
            format!("{}e{}", normalized, exp)
        }
        None => normalized,
    };

    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn has_digit(chars: &[char]) -> bool {
    chars.iter().any(|c| c.is_ascii_digit())
}

/// `e`/`E` 前一位为数字,后接数字或符号加数字
fn is_exponent_marker(chars: &[char], i: usize) -> bool {
    if !matches!(chars[i], 'e' | 'E') || i == 0 || !chars[i - 1].is_ascii_digit() {
        return false;
    }
    match chars.get(i + 1) {
        Some(c) if c.is_ascii_digit() => true,
        Some('+') | Some('-') => chars.get(i + 2).map_or(false, |c| c.is_ascii_digit()),
        _ => false,
    }
}

/// 尾数中的千分位/小数点判定,返回标准小数形式
fn resolve_separators(mantissa: &str, scientific: bool) -> String {
    let last_dot = mantissa.rfind('.');
    let last_comma = mantissa.rfind(',');

    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            if comma > dot {
                mantissa.replace('.', "").replace(',', ".")
            } else {
                mantissa.replace(',', "")
            }
        }
        (None, Some(_)) => {
            if mantissa.matches(',').count() == 1 {
                mantissa.replace(',', ".")
            } else {
                mantissa.replace(',', "")
            }
        }
        (Some(dot), None) => {
            let thousands = mantissa.matches('.').count() > 1
                || (!scientific && is_thousands_group(mantissa, dot));
            if thousands {
                mantissa.replace('.', "")
            } else {
                mantissa.to_string()
            }
        }
        (None, None) => mantissa.to_string(),
    }
}

/// 单个 `.` 是否为千分位: "12.345" 是, "0.500" / "1234.567" / "1.5" 不是
fn is_thousands_group(text: &str, dot: usize) -> bool {
    let integer_part = text[..dot].trim_start_matches(['-', '+']);
    let fraction_part = &text[dot + 1..];
    fraction_part.len() == 3
        && (1..=3).contains(&integer_part.len())
        && integer_part != "0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  ene  ", false), "ene");
        assert_eq!(cleaner.clean_text("  ene  ", true), "ENE");
    }

    #[test]
    fn test_value_to_text() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.value_to_text(&json!("  Ana ")), Some("Ana".to_string()));
        assert_eq!(cleaner.value_to_text(&json!(101)), Some("101".to_string()));
        assert_eq!(cleaner.value_to_text(&json!("   ")), None);
        assert_eq!(cleaner.value_to_text(&Value::Null), None);
    }

    #[test]
    fn test_safe_number_localized() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.safe_number(Some(&json!("$ 1.234.567,89"))), 1234567.89);
        assert_eq!(cleaner.safe_number(Some(&json!("1.000.000"))), 1000000.0);
        assert_eq!(cleaner.safe_number(Some(&json!("800000"))), 800000.0);
        assert_eq!(cleaner.safe_number(Some(&json!("12.345"))), 12345.0);
    }

    #[test]
    fn test_safe_number_placeholders() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.safe_number(Some(&json!("-"))), 0.0);
        assert_eq!(cleaner.safe_number(Some(&json!(""))), 0.0);
        assert_eq!(cleaner.safe_number(Some(&json!("n/a"))), 0.0);
        assert_eq!(cleaner.safe_number(Some(&Value::Null)), 0.0);
        assert_eq!(cleaner.safe_number(Some(&json!(true))), 0.0);
        assert_eq!(cleaner.safe_number(None), 0.0);
    }

    #[test]
    fn test_safe_number_clean_input_is_idempotent() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.safe_number(Some(&json!(42))), 42.0);
        assert_eq!(cleaner.safe_number(Some(&json!(1234.56))), 1234.56);
        assert_eq!(cleaner.safe_number(Some(&json!("1234.56"))), 1234.56);
        assert_eq!(cleaner.safe_number(Some(&json!("0.500"))), 0.5);

        let once = cleaner.safe_number(Some(&json!("$ 1.234.567,89")));
        assert_eq!(cleaner.safe_number(Some(&json!(once))), once);
    }

    #[test]
    fn test_safe_number_us_format_and_percent() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.safe_number(Some(&json!("1,234.5"))), 1234.5);
        assert_eq!(cleaner.safe_number(Some(&json!("98,5 %"))), 98.5);
        assert_eq!(cleaner.safe_number(Some(&json!("-1.500,25"))), -1500.25);
        assert_eq!(cleaner.safe_number(Some(&json!("1e5"))), 100000.0);
        assert_eq!(cleaner.safe_number(Some(&json!("1.5e3"))), 1500.0);
        assert_eq!(cleaner.safe_number(Some(&json!("2,5E-1"))), 0.25);
        assert_eq!(cleaner.safe_number(Some(&json!("12abc34"))), 0.0);
        assert_eq!(cleaner.safe_number(Some(&json!("1e"))), 1.0);
    }

    #[test]
    fn test_normalize_month_code() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_month_code(Some(&json!(" ene "))), "ENE");
        assert_eq!(cleaner.normalize_month_code(Some(&json!("enero"))), "ENERO");
        assert_eq!(cleaner.normalize_month_code(None), "");
    }
}
