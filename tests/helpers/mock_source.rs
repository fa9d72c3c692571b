// ==========================================
// 测试用数据源
// ==========================================

use async_trait::async_trait;
use sales_dashboard::domain::RawBatch;
use sales_dashboard::source::{FetchError, FetchResult, RecordSource};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// ==========================================
// ScriptedSource - 按顺序返回预置结果
// ==========================================

pub struct ScriptedSource {
    responses: Mutex<VecDeque<FetchResult<RawBatch>>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<FetchResult<RawBatch>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn fetch_batch(&self) -> FetchResult<RawBatch> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no scripted response".to_string())))
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

// ==========================================
// GatedSource - 首次拉取挂起直到放行,之后立即返回
// ==========================================

pub struct GatedSource {
    slow: Mutex<Option<(RawBatch, oneshot::Receiver<()>)>>,
    fast: Mutex<Option<RawBatch>>,
    started: mpsc::UnboundedSender<()>,
}

pub struct Gate {
    pub release: oneshot::Sender<()>,
    pub started: mpsc::UnboundedReceiver<()>,
}

impl GatedSource {
    pub fn new(slow: RawBatch, fast: RawBatch) -> (Arc<Self>, Gate) {
        let (release, gate_rx) = oneshot::channel();
        let (started_tx, started) = mpsc::unbounded_channel();
        let source = Arc::new(Self {
            slow: Mutex::new(Some((slow, gate_rx))),
            fast: Mutex::new(Some(fast)),
            started: started_tx,
        });
        (source, Gate { release, started })
    }
}

#[async_trait]
impl RecordSource for GatedSource {
    async fn fetch_batch(&self) -> FetchResult<RawBatch> {
        let slow = self.slow.lock().unwrap().take();
        if let Some((batch, gate)) = slow {
            let _ = self.started.send(());
            let _ = gate.await;
            return Ok(batch);
        }

        self.fast
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| FetchError::Transport("no batch left".to_string()))
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}
