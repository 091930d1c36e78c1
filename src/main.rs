mod clients;
mod config;
mod error;
mod helpers;
mod models;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use clients::{ClusterReader, KubeReader};

#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<dyn ClusterReader>,
    pub config: Arc<config::Config>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("cluster_dashboard=info,tower_http=info")
            }),
        )
        .init();

    let explicit_path = std::env::args()
        .skip(1)
        .zip(std::env::args().skip(2))
        .find_map(|(k, v)| (k == "-config" || k == "--config").then_some(v))
        .or_else(|| std::env::args().nth(1).filter(|a| !a.starts_with('-')));
    let explicit = explicit_path.is_some();
    let config_path = explicit_path.unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());

    let cfg = config::Config::load_or_default(&PathBuf::from(&config_path), explicit)
        .unwrap_or_else(|e| {
            eprintln!("error loading config: {}", e);
            std::process::exit(1);
        });

    let reader = if cfg.in_cluster {
        KubeReader::in_cluster()
    } else {
        KubeReader::inferred().await
    }
    .unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });
    info!(in_cluster = cfg.in_cluster, "kubernetes client ready");

    let cfg = Arc::new(cfg);
    let state = AppState {
        reader: Arc::new(reader),
        config: cfg.clone(),
    };

    let router = routes::build_router(state);

    let listen_addr = cfg.listen_addr();
    let listener = TcpListener::bind(&listen_addr).await.unwrap_or_else(|e| {
        eprintln!("failed to bind {}: {}", listen_addr, e);
        std::process::exit(1);
    });

    info!(cluster = %cfg.cluster_name, "cluster-dashboard listening on {}", listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            eprintln!("server error: {}", e);
            std::process::exit(1);
        });
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal as unix_signal};

    let mut sigterm = match unix_signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "SIGTERM handler unavailable, only ctrl+c stops the server");
            let _ = signal::ctrl_c().await;
            info!(signal = "SIGINT", "draining connections");
            return;
        }
    };

    let received = tokio::select! {
        _ = signal::ctrl_c() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    };
    info!(signal = received, "draining connections");
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!(signal = "ctrl+c", "draining connections");
}
