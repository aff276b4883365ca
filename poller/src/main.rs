//! Service poller Server Entry Point

use anyhow::Context;
use clap::Parser;
use service_poller::cli::{Cli, Commands};
use service_poller::config::PollerConfig;
use service_poller::db::migrations::initialize_database;
use service_poller::health::{BackgroundPoller, HttpProber, PollScheduler};
use service_poller::registry::ServiceRegistry;
use service_poller::shutdown::ShutdownController;
use service_poller::{cli, logging, server, AppState};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // ファイル出力時はプロセス終了までガードを保持する
    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Migrate(args)) => cli::migrate::execute(&args)
            .await
            .context("Database migration failed"),
        Some(Commands::Serve(args)) => match PollerConfig::from_env() {
            Ok(config) => run_server(args.apply_to(config)).await,
            Err(e) => Err(e.into()),
        },
        // No subcommand - default to serve
        None => match PollerConfig::from_env() {
            Ok(config) => run_server(config).await,
            Err(e) => Err(e.into()),
        },
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: PollerConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();

    info!(
        bind_addr = %bind_addr,
        database_url = %config.database_url,
        poll_interval_secs = config.poll_interval.as_secs(),
        probe_timeout_ms = config.probe_timeout.as_millis() as u64,
        "Starting service poller"
    );

    let pool = initialize_database(&config.database_url)
        .await
        .context("Failed to initialize database")?;

    let registry = ServiceRegistry::with_pool(pool.clone());
    let prober = Arc::new(HttpProber::new(config.probe_timeout));
    let poller = BackgroundPoller::new(registry.clone(), prober);

    let shutdown = ShutdownController::default();
    let scheduler = PollScheduler::new(poller, config.poll_interval).start(shutdown.clone());

    let result = server::run(AppState { registry }, &bind_addr, shutdown.clone()).await;

    // バインド失敗時もスケジューラを止める
    shutdown.request_shutdown();
    if let Err(e) = scheduler.await {
        warn!(error = %e, "Poll scheduler task ended abnormally");
    }
    pool.close().await;

    result.with_context(|| format!("Server error on {}", bind_addr))
}
