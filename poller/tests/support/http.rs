use std::{io, net::SocketAddr};

use service_poller::shutdown::ShutdownController;
use service_poller::{server, AppState};
use tokio::{net::TcpListener, task::JoinHandle};

/// テスト用に実ポートへバインドしたpollerサーバー
#[allow(dead_code)]
pub struct TestServer {
    addr: SocketAddr,
    shutdown: ShutdownController,
    handle: JoinHandle<Result<(), io::Error>>,
}

#[allow(dead_code)]
impl TestServer {
    /// サーバーがバインドしているアドレスを返す
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `/api/v1/services`以下のURLを組み立てる
    pub fn services_url(&self, suffix: &str) -> String {
        format!("http://{}/api/v1/services{}", self.addr, suffix)
    }

    /// サーバーと共有しているシャットダウンコントローラ
    pub fn shutdown(&self) -> ShutdownController {
        self.shutdown.clone()
    }

    /// サーバーを停止し、バックグラウンドタスクの終了を待つ
    pub async fn stop(self) {
        self.shutdown.request_shutdown();
        let _ = self.handle.await;
    }
}

/// `127.0.0.1:0`にバインドしてサーバーを起動する
pub async fn spawn_poller(state: AppState) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = ShutdownController::default();
    let handle = tokio::spawn(server::serve(state, listener, shutdown.clone()));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}
