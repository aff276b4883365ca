//! バックグラウンドポーラー
//!
//! 1回のポーリングサイクルで全サービスを取得し、サービスごとに独立した
//! プローブ＋ステータス更新タスクを起動する。

use super::prober::Prober;
use crate::common::error::PollerResult;
use crate::registry::ServiceRegistry;
use crate::types::service::{Service, ServiceStatus};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// 起動済みのポーリングサイクル
///
/// 各タスクは完了時に新しいステータスを反映した`Service`を返す。
/// ハンドルを破棄してもタスクは継続する。
#[derive(Debug)]
pub struct PollCycle {
    tasks: Vec<JoinHandle<Service>>,
}

impl PollCycle {
    /// 起動したタスク数
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// タスクが1つもないか
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 全タスクの完了を待ち、結果を返す
    ///
    /// パニックしたタスクはログに残して結果から除外する。
    pub async fn join(self) -> Vec<Service> {
        let mut services = Vec::with_capacity(self.tasks.len());
        for result in futures::future::join_all(self.tasks).await {
            match result {
                Ok(service) => services.push(service),
                Err(e) => error!(error = %e, "Poll task join error"),
            }
        }
        services
    }
}

/// バックグラウンドポーラー
#[derive(Clone)]
pub struct BackgroundPoller {
    registry: ServiceRegistry,
    prober: Arc<dyn Prober>,
}

impl BackgroundPoller {
    /// 新しいポーラーを作成
    pub fn new(registry: ServiceRegistry, prober: Arc<dyn Prober>) -> Self {
        Self { registry, prober }
    }

    /// 全サービスのポーリングを起動する
    ///
    /// 一覧取得に失敗した場合はエラーを返し、このサイクルのプローブは起動しない。
    /// タスクの完了は待たずに返る。
    pub async fn poll_services(&self) -> PollerResult<PollCycle> {
        let services = self.registry.get_all().await?;

        debug!(count = services.len(), "Dispatching service probes");

        let tasks = services
            .into_iter()
            .map(|service| {
                let poller = self.clone();
                tokio::spawn(async move { poller.poll_service(service).await })
            })
            .collect();

        Ok(PollCycle { tasks })
    }

    /// 単一サービスをプローブし、結果をステータスとして書き込む
    async fn poll_service(&self, service: Service) -> Service {
        let reachable = match self.prober.probe(&service.url).await {
            Ok(reachable) => reachable,
            Err(e) => {
                error!(
                    service_id = %service.id,
                    url = %service.url,
                    error = %e,
                    "An error occurred while polling service"
                );
                false
            }
        };
        let status = ServiceStatus::from_reachable(reachable);

        match self
            .registry
            .update_status(Some(service.id), Some(status))
            .await
        {
            Ok(true) => debug!(
                service_id = %service.id,
                status = %status,
                "Service status updated"
            ),
            Ok(false) => debug!(
                service_id = %service.id,
                "Service removed before status update"
            ),
            Err(e) => warn!(
                service_id = %service.id,
                status = %status,
                error = %e,
                "Failed to update service status"
            ),
        }

        service.with_status(status)
    }
}
