//! 取消信号
//!
//! 一次提交共享一个 [`CancelToken`]，在每次请求前检查

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// 触发取消；重复调用无副作用
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// 等待取消信号
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // sender 由 self 持有，wait_for 不会因通道关闭而返回错误
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// 超过 `after` 后自动取消
    ///
    /// 返回的句柄在正常结束时应当 abort
    pub fn cancel_after(&self, after: Duration) -> JoinHandle<()> {
        let token = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if !token.is_cancelled() {
                warn!("⏱️ 超过 {} 秒，取消剩余请求", after.as_secs());
                token.cancel();
            }
        })
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
