// ==========================================
// 销售看板 - 导出
// ==========================================
// JSON: 规整后、筛选前的全部规范记录（单个顶层数组,UTF-8）
// CSV: 期次聚合 / 销售员排名（当前筛选结果）
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::sales::SalesRecord;
use crate::domain::views::DashboardViews;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 记录导出文件名: dashboard_ventas_<YYYY-MM-DD>.json
pub fn records_file_name(date: NaiveDate) -> String {
    format!("dashboard_ventas_{}.json", date.format("%Y-%m-%d"))
}

/// 写出规范记录 JSON
///
/// # 参数
/// - records: 全部规范记录（不受筛选影响）
/// - dir: 导出目录（不存在时创建）
/// - date: 文件名日期
pub fn write_records_json(records: &[SalesRecord], dir: &Path, date: NaiveDate) -> ApiResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(records_file_name(date));

    let json = serde_json::to_string_pretty(records)?;
    fs::write(&path, json)?;

    tracing::info!(path = %path.display(), records = records.len(), "记录已导出");
    Ok(path)
}

/// 写出聚合视图 CSV
///
/// # 返回
/// - (期次文件, 销售员文件)
pub fn write_views_csv(
    views: &DashboardViews,
    dir: &Path,
    date: NaiveDate,
) -> ApiResult<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;
    let stamp = date.format("%Y-%m-%d");

    let periods_path = dir.join(format!("dashboard_periodos_{}.csv", stamp));
    write_rows(&periods_path, &views.periods)?;

    let sellers_path = dir.join(format!("dashboard_vendedores_{}.csv", stamp));
    write_rows(&sellers_path, &views.sellers)?;

    tracing::info!(
        periods = %periods_path.display(),
        sellers = %sellers_path.display(),
        "聚合视图已导出"
    );
    Ok((periods_path, sellers_path))
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> ApiResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ViewBuilder;

    fn record(seller: &str, actual: f64) -> SalesRecord {
        SalesRecord {
            id: 1,
            year: 2024,
            period: 1,
            month_code: "ENE".to_string(),
            month_label: "ENE".to_string(),
            seller_code: "V1".to_string(),
            seller_name: seller.to_string(),
            actual,
            goal1: 100.0,
            goal2: 0.0,
            attainment1: actual,
            attainment2: 0.0,
            last_updated: "ts".to_string(),
        }
    }

    #[test]
    fn test_records_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(records_file_name(date), "dashboard_ventas_2026-03-07.json");
    }

    #[test]
    fn test_write_records_json_uses_canonical_keys() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let path = write_records_json(&[record("Ana", 50.0)], dir.path(), date).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["vendedor"], "Ana");
        assert_eq!(first["año"], 2024);
        assert_eq!(first["ventas"], 50.0);
    }

    #[test]
    fn test_write_views_csv() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let records = vec![record("Ana", 50.0), record("Luis", 80.0)];
        let views = ViewBuilder::new().build(&records);

        let (periods, sellers) = write_views_csv(&views, dir.path(), date).unwrap();

        let periods_text = fs::read_to_string(periods).unwrap();
        assert!(periods_text.starts_with("key,period,monthLabel"));
        assert_eq!(periods_text.lines().count(), 2);

        let sellers_text = fs::read_to_string(sellers).unwrap();
        let lines: Vec<&str> = sellers_text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Luis,"));
    }
}
