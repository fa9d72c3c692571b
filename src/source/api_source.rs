// ==========================================
// 销售看板 - 远程接口数据源
// ==========================================
// 契约: GET {base_url}/ventas
// 响应: { success: bool, data: RawRecord[], timestamp?: string }
// 失败: 非 2xx / success 为假 / data 非数组
// ==========================================

use crate::config::DashboardConfig;
use crate::domain::sales::RawBatch;
use crate::importer::file_parser::collect_raw_records;
use crate::source::error::{FetchError, FetchResult};
use crate::source::record_source::RecordSource;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// 错误响应体在错误信息中保留的最大字符数
const MAX_ERROR_BODY_CHARS: usize = 200;

pub struct ApiRecordSource {
    client: reqwest::Client,
    base_url: String,
}

impl ApiRecordSource {
    /// 创建接口数据源
    ///
    /// # 参数
    /// - base_url: 接口根地址（末尾斜杠可有可无）
    /// - timeout: 单次请求超时
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("HTTP 客户端初始化失败: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &DashboardConfig) -> FetchResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// 完整请求地址
    pub fn endpoint(&self) -> String {
        format!("{}/ventas", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RecordSource for ApiRecordSource {
    async fn fetch_batch(&self) -> FetchResult<RawBatch> {
        let url = self.endpoint();
        tracing::debug!(url = %url, "请求销售数据");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body: Value = response.json().await?;
        parse_envelope(body, &url)
    }

    fn describe(&self) -> String {
        self.endpoint()
    }
}

/// 校验响应信封并提取原始批次
///
/// # 规则
/// - success 按真值判断（true / 非零数字 / 非空字符串 / 对象 / 数组）
/// - data 必须为数组,非对象元素跳过
/// - timestamp 缺失时取当前 UTC 时间
pub fn parse_envelope(body: Value, source: &str) -> FetchResult<RawBatch> {
    let mut envelope = match body {
        Value::Object(map) => map,
        _ => {
            return Err(FetchError::ContractViolation(
                "响应体不是 JSON 对象".to_string(),
            ))
        }
    };

    if !is_truthy(envelope.get("success")) {
        return Err(FetchError::ContractViolation(
            "success 字段为假".to_string(),
        ));
    }

    let items = match envelope.remove("data") {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(FetchError::ContractViolation(
                "data 字段不是数组".to_string(),
            ))
        }
    };

    let timestamp = envelope
        .get("timestamp")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    Ok(RawBatch::new(collect_raw_records(items), timestamp, source))
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0 && !v.is_nan()).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_envelope_success() {
        let body = json!({
            "success": true,
            "data": [{ "ventas": 1 }, { "ventas": 2 }],
            "timestamp": "2024-05-01T08:00:00Z"
        });
        let batch = parse_envelope(body, "http://api/ventas").unwrap();

        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.timestamp, "2024-05-01T08:00:00Z");
        assert_eq!(batch.source, "http://api/ventas");
    }

    #[test]
    fn test_parse_envelope_missing_timestamp_defaults_to_now() {
        let batch = parse_envelope(json!({ "success": 1, "data": [] }), "x").unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&batch.timestamp).is_ok());
    }

    #[test]
    fn test_parse_envelope_contract_violations() {
        let cases = vec![
            json!({ "success": false, "data": [] }),
            json!({ "success": 0, "data": [] }),
            json!({ "data": [] }),
            json!({ "success": true, "data": { "ventas": 1 } }),
            json!({ "success": true }),
            json!([{ "ventas": 1 }]),
        ];
        for body in cases {
            let err = parse_envelope(body.clone(), "x").unwrap_err();
            assert!(err.is_contract_violation(), "期望契约违反: {}", body);
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let source = ApiRecordSource::new("http://localhost:3000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:3000/api/ventas");
    }
}
