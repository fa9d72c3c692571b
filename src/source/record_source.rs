// ==========================================
// 销售看板 - 数据源 Trait
// ==========================================
// 用途: 一次拉取一个完整批次（无分页,无鉴权）
// 实现者: ApiRecordSource, FileRecordSource
// ==========================================

use crate::domain::sales::RawBatch;
use crate::source::error::FetchResult;
use async_trait::async_trait;

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// 拉取一个原始批次
    ///
    /// # 返回
    /// - Ok(RawBatch): 原始记录 + 批次时间戳
    /// - Err(FetchError): 传输失败、契约违反、文件错误
    ///
    /// # 说明
    /// - 发出后不可取消
    /// - 并发调用互不感知,由调用方按序号丢弃过期响应
    async fn fetch_batch(&self) -> FetchResult<RawBatch>;

    /// 数据源描述（日志用）
    fn describe(&self) -> String;
}
