// ==========================================
// 销售看板 - 离线文件数据源
// ==========================================
// 用途: 读取导出文件或 CSV/Excel 快照,走与接口相同的规整管道
// ==========================================

use crate::domain::sales::RawBatch;
use crate::importer::error::ImportError;
use crate::importer::file_parser::UniversalFileParser;
use crate::source::error::FetchResult;
use crate::source::record_source::RecordSource;
use async_trait::async_trait;
use std::path::PathBuf;

pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    async fn fetch_batch(&self) -> FetchResult<RawBatch> {
        let path = self.path.clone();

        // 文件解析为阻塞 I/O
        let records = tokio::task::spawn_blocking(move || UniversalFileParser.parse(&path))
            .await
            .map_err(|e| ImportError::Other(anyhow::anyhow!("文件解析任务异常: {}", e)))??;

        Ok(RawBatch::new(
            records,
            chrono::Utc::now().to_rfc3339(),
            self.describe(),
        ))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
