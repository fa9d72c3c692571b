// ==========================================
// 销售看板 - 文件解析器实现
// ==========================================
// 用途: 离线快照导入（与远程接口同一规整管道）
// 支持: JSON (.json) / CSV (.csv) / Excel (.xlsx/.xls)
// ==========================================

use crate::domain::sales::RawRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 数组元素 → 原始记录（非对象元素跳过）
pub fn collect_raw_records(items: Vec<Value>) -> Vec<RawRecord> {
    let total = items.len();
    let records: Vec<RawRecord> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

    if records.len() < total {
        tracing::warn!(skipped = total - records.len(), "跳过非对象记录");
    }
    records
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 接受: 顶层数组（导出文件）或 { data: [...] } 信封
pub struct JsonParser;

impl FileParser for JsonParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;

        let reader = BufReader::new(File::open(file_path)?);
        let value: Value = serde_json::from_reader(reader)?;

        match value {
            Value::Array(items) => Ok(collect_raw_records(items)),
            Value::Object(mut envelope) => match envelope.remove("data") {
                Some(Value::Array(items)) => Ok(collect_raw_records(items)),
                _ => Err(ImportError::ShapeError(
                    "JSON 对象缺少 data 数组".to_string(),
                )),
            },
            _ => Err(ImportError::ShapeError(
                "JSON 顶层必须为数组或对象".to_string(),
            )),
        }
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let mut map = RawRecord::new();

            for (col_idx, value) in row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    map.insert(header.clone(), Value::String(value.trim().to_string()));
                }
            }

            // 跳过完全空白的行
            if map.values().all(is_blank) {
                continue;
            }

            records.push(map);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取第一个工作表,首行为表头
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut map = RawRecord::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    map.insert(header.clone(), cell_to_value(cell));
                }
            }

            if map.values().all(is_blank) {
                continue;
            }

            records.push(map);
        }

        Ok(records)
    }
}

/// 单元格 → JSON 值（数字保持数字,其余转文本）
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::Empty => Value::Null,
        other => Value::String(other.to_string().trim().to_string()),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRecord>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let records = match ext.as_str() {
            "json" => JsonParser.parse_to_raw_records(path)?,
            "csv" => CsvParser.parse_to_raw_records(path)?,
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path)?,
            _ => return Err(ImportError::UnsupportedFormat(ext)),
        };

        tracing::debug!(path = %path.display(), rows = records.len(), "文件解析完成");
        Ok(records)
    }
}
