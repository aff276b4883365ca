//! 定期ポーリングスケジューラ
//!
//! 固定間隔で`BackgroundPoller::poll_services`を起動する。
//! 最初のサイクルは起動から1周期後に実行される。

use super::poller::BackgroundPoller;
use crate::shutdown::ShutdownController;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// デフォルトのポーリング周期（秒）
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60 * 60;

/// 定期ポーリングスケジューラ
pub struct PollScheduler {
    poller: BackgroundPoller,
    interval: Duration,
}

impl PollScheduler {
    /// 周期を指定してスケジューラを作成
    pub fn new(poller: BackgroundPoller, interval: Duration) -> Self {
        Self { poller, interval }
    }

    /// バックグラウンドでスケジュールを開始
    ///
    /// `shutdown`が要求されるとループを抜けてタスクが終了する。
    /// 実行中のプローブタスクは待たない。
    pub fn start(self, shutdown: ShutdownController) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    async fn run(&self, shutdown: ShutdownController) {
        let mut timer = interval(self.interval);
        // サイクルが周期を超えても、取りこぼしたティックをまとめて実行しない
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.interval.as_secs(),
            "Service poll scheduler started"
        );

        // `interval()`の最初のティックは即時に返るため読み捨てる
        timer.tick().await;

        loop {
            tokio::select! {
                _ = timer.tick() => self.run_cycle().await,
                _ = shutdown.wait() => break,
            }
        }

        info!("Service poll scheduler stopped");
    }

    async fn run_cycle(&self) {
        match self.poller.poll_services().await {
            Ok(cycle) => {
                debug!(dispatched = cycle.len(), "Poll cycle dispatched");
                // 完了は待たない。次のサイクルと重なってもよい
                drop(cycle);
            }
            Err(e) => error!(error = %e, "Failed to fetch services for polling"),
        }
    }
}
