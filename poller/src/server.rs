//! axumサーバー起動・シャットダウンハンドリング

use crate::shutdown::ShutdownController;
use crate::AppState;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// アドレスにバインドしてサーバーを起動し、シャットダウンシグナルを待機する
pub async fn run(
    state: AppState,
    bind_addr: &str,
    shutdown: ShutdownController,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    serve(state, listener, shutdown).await
}

/// バインド済みのリスナーでサーバーを起動する
///
/// テストでは`127.0.0.1:0`にバインドしたリスナーを渡して使う。
pub async fn serve(
    state: AppState,
    listener: TcpListener,
    shutdown: ShutdownController,
) -> std::io::Result<()> {
    let app = crate::api::create_app(state);

    info!("Service poller listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    // シグナル経由で停止した場合もスケジューラへ伝える
    shutdown.request_shutdown();

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal(shutdown: ShutdownController) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
        _ = shutdown.wait() => {
            info!("Shutdown requested, shutting down...");
        }
    }
}
