// ==========================================
// 销售看板 - 看板状态
// ==========================================
// 职责: 记录集合 + 筛选器 + 加载/错误标记
// 红线: 不可变值; 每次更新返回新状态,从不原地修改
// 序号: 每次刷新签发递增序号,过期响应直接丢弃
// ==========================================

use crate::domain::sales::SalesRecord;
use crate::domain::views::{DashboardViews, FilterOptions};
use crate::engine::{filter_options, FilterSelection, ViewBuilder};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// 刷新凭证（签发时的序号）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    pub seq: u64,
}

/// 刷新结果的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefreshOutcome {
    /// 已应用到状态
    Applied,
    /// 序号过期,已丢弃
    Stale,
}

// ==========================================
// DashboardState - 看板状态
// ==========================================
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// 规范记录（整体替换）
    records: Arc<[SalesRecord]>,
    /// 当前筛选条件
    filters: FilterSelection,
    /// 是否有进行中的刷新
    loading: bool,
    /// 最近一次失败的提示信息（成功后清除）
    error: Option<String>,
    /// 最近一次成功批次的时间戳
    last_fetch: Option<String>,
    /// 最近一次成功批次的ID
    batch_id: Option<Uuid>,
    /// 已签发的最大序号
    issued_seq: u64,
    /// 已应用的最大序号
    applied_seq: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            filters: FilterSelection::all(),
            loading: false,
            error: None,
            last_fetch: None,
            batch_id: None,
            issued_seq: 0,
            applied_seq: 0,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_fetch(&self) -> Option<&str> {
        self.last_fetch.as_deref()
    }

    pub fn batch_id(&self) -> Option<Uuid> {
        self.batch_id
    }

    // ==========================================
    // 纯派生
    // ==========================================

    /// 筛选后的记录
    pub fn filtered(&self) -> Vec<&SalesRecord> {
        self.filters.apply(&self.records)
    }

    /// 筛选候选项（基于全部记录,不受当前筛选影响）
    pub fn filter_options(&self) -> FilterOptions {
        filter_options(&self.records)
    }

    /// 派生视图
    pub fn views(&self) -> DashboardViews {
        ViewBuilder::new().build(self.filtered())
    }

    // ==========================================
    // 状态转换（返回新状态）
    // ==========================================

    /// 替换筛选条件（不存在的取值不自动重置）
    pub fn with_filters(&self, filters: FilterSelection) -> Self {
        Self {
            filters,
            ..self.clone()
        }
    }

    /// 开始刷新: 签发新序号并置加载标记
    pub fn begin_refresh(&self) -> (Self, RefreshTicket) {
        let ticket = RefreshTicket {
            seq: self.issued_seq + 1,
        };
        let next = Self {
            loading: true,
            issued_seq: ticket.seq,
            ..self.clone()
        };
        (next, ticket)
    }

    /// 刷新成功: 整体替换记录集合
    ///
    /// 序号早于最新签发序号的响应被丢弃（状态不变）
    pub fn complete_refresh(
        &self,
        ticket: RefreshTicket,
        records: Vec<SalesRecord>,
        timestamp: String,
        batch_id: Uuid,
    ) -> (Self, RefreshOutcome) {
        if self.is_stale(ticket) {
            tracing::warn!(
                seq = ticket.seq,
                issued_seq = self.issued_seq,
                "丢弃过期的刷新响应"
            );
            return (self.clone(), RefreshOutcome::Stale);
        }

        let next = Self {
            records: records.into(),
            loading: false,
            error: None,
            last_fetch: Some(timestamp),
            batch_id: Some(batch_id),
            applied_seq: ticket.seq,
            ..self.clone()
        };
        (next, RefreshOutcome::Applied)
    }

    /// 刷新失败: 保留原有记录,仅记录错误提示
    pub fn fail_refresh(&self, ticket: RefreshTicket, message: String) -> (Self, RefreshOutcome) {
        if self.is_stale(ticket) {
            tracing::warn!(
                seq = ticket.seq,
                issued_seq = self.issued_seq,
                "丢弃过期的刷新失败"
            );
            return (self.clone(), RefreshOutcome::Stale);
        }

        let next = Self {
            loading: false,
            error: Some(message),
            applied_seq: ticket.seq,
            ..self.clone()
        };
        (next, RefreshOutcome::Applied)
    }

    fn is_stale(&self, ticket: RefreshTicket) -> bool {
        ticket.seq < self.issued_seq || ticket.seq <= self.applied_seq
    }
}
