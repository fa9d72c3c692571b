// ==========================================
// 销售看板 - 看板 API
// ==========================================
// 职责: 拉取 → 规整 → 状态替换; 筛选更新; 视图派生; 导出
// 红线: 失败不清空已有数据; 过期响应不覆盖新结果
// 架构: API 层 → App 状态 (DashboardState) → Engine / Importer / Source
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Local;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::export;
use crate::app::state::{DashboardState, RefreshOutcome};
use crate::domain::views::{DashboardViews, FilterOptions};
use crate::engine::{parse_month_selector, parse_seller_selector, parse_year_selector, FilterSelection};
use crate::importer::RecordNormalizer;
use crate::source::RecordSource;

/// 一次刷新的摘要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub outcome: RefreshOutcome,
    pub record_count: usize,
    pub batch_id: Uuid,
    pub timestamp: String,
    pub source: String,
}

// ==========================================
// DashboardApi - 看板 API
// ==========================================

/// 看板API
///
/// 状态以 `Arc<DashboardState>` 整体替换; 读取方拿到的快照不会被后续更新修改
pub struct DashboardApi {
    source: Arc<dyn RecordSource>,
    normalizer: RecordNormalizer,
    state: RwLock<Arc<DashboardState>>,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - source: 数据源（远程接口或离线文件）
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self::with_normalizer(source, RecordNormalizer::new())
    }

    pub fn with_normalizer(source: Arc<dyn RecordSource>, normalizer: RecordNormalizer) -> Self {
        Self {
            source,
            normalizer,
            state: RwLock::new(Arc::new(DashboardState::new())),
        }
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> Arc<DashboardState> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 在写锁内完成一次状态转换
    fn transition<R>(&self, f: impl FnOnce(&DashboardState) -> (DashboardState, R)) -> R {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let (next, result) = f(&guard);
        *guard = Arc::new(next);
        result
    }

    // ==========================================
    // 刷新
    // ==========================================

    /// 拉取并替换记录集合
    ///
    /// # 返回
    /// - Ok(RefreshSummary): 拉取成功（outcome 表明是否已应用）
    /// - Err(ApiError): 拉取失败; 状态保留原记录并记下错误提示
    pub async fn refresh(&self) -> ApiResult<RefreshSummary> {
        let ticket = self.transition(|state| state.begin_refresh());
        tracing::info!(seq = ticket.seq, source = %self.source.describe(), "开始刷新");

        match self.source.fetch_batch().await {
            Ok(batch) => {
                let records = self.normalizer.normalize_batch(&batch);
                let record_count = records.len();
                let outcome = self.transition(|state| {
                    state.complete_refresh(ticket, records, batch.timestamp.clone(), batch.batch_id)
                });

                if outcome == RefreshOutcome::Applied {
                    tracing::info!(
                        seq = ticket.seq,
                        batch_id = %batch.batch_id,
                        records = record_count,
                        "刷新完成"
                    );
                }

                Ok(RefreshSummary {
                    outcome,
                    record_count,
                    batch_id: batch.batch_id,
                    timestamp: batch.timestamp,
                    source: batch.source,
                })
            }
            Err(err) => {
                let api_err = ApiError::from(err);
                tracing::error!(seq = ticket.seq, code = api_err.code(), "刷新失败: {}", api_err);
                let message = api_err.user_message();
                self.transition(|state| state.fail_refresh(ticket, message));
                Err(api_err)
            }
        }
    }

    // ==========================================
    // 筛选
    // ==========================================

    /// 整体替换筛选条件
    pub fn set_filters(&self, filters: FilterSelection) -> DashboardViews {
        self.update_filters(|_| filters)
    }

    /// 设置年份筛选（"all" 或整数年份）
    pub fn set_year(&self, raw: &str) -> ApiResult<DashboardViews> {
        let year = parse_year_selector(raw).ok_or_else(|| invalid_input("year", raw))?;
        Ok(self.update_filters(|current| current.clone().with_year(year)))
    }

    /// 设置销售员筛选（"all" 或销售员名称）
    pub fn set_seller(&self, raw: &str) -> ApiResult<DashboardViews> {
        let seller = parse_seller_selector(raw);
        Ok(self.update_filters(|current| current.clone().with_seller(seller)))
    }

    /// 设置月份筛选（"all" 或 ENE..DIC）
    pub fn set_month(&self, raw: &str) -> ApiResult<DashboardViews> {
        let month = parse_month_selector(raw).ok_or_else(|| invalid_input("month", raw))?;
        Ok(self.update_filters(|current| current.clone().with_month(month)))
    }

    /// 在写锁内基于当前筛选计算新筛选,并发设置互不覆盖
    fn update_filters(&self, f: impl FnOnce(&FilterSelection) -> FilterSelection) -> DashboardViews {
        let state = self.transition(|state| {
            let filters = f(state.filters());
            tracing::debug!(
                year = %filters.year,
                seller = %filters.seller,
                month = %filters.month,
                "更新筛选条件"
            );
            let next = state.with_filters(filters);
            (next.clone(), next)
        });
        state.views()
    }

    /// 重置全部筛选为 "all"
    pub fn reset_filters(&self) -> DashboardViews {
        self.set_filters(FilterSelection::all())
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn filter_options(&self) -> FilterOptions {
        self.snapshot().filter_options()
    }

    pub fn views(&self) -> DashboardViews {
        self.snapshot().views()
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出全部规范记录（不受筛选影响）
    pub fn export_records(&self, dir: &Path) -> ApiResult<PathBuf> {
        let state = self.snapshot();
        export::write_records_json(state.records(), dir, Local::now().date_naive())
    }

    /// 导出当前筛选下的聚合视图
    pub fn export_views_csv(&self, dir: &Path) -> ApiResult<(PathBuf, PathBuf)> {
        let views = self.views();
        export::write_views_csv(&views, dir, Local::now().date_naive())
    }
}

fn invalid_input(field: &str, value: &str) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        value: value.to_string(),
    }
}
