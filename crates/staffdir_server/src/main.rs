//! Staff directory HTTP server.

use log::info;
use staffdir_core::{init_logging, Store};
use staffdir_server::{router, AppConfig, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.log.level, config.log.dir.as_deref()).map_err(anyhow::Error::msg)?;

    let store = Arc::new(Store::open(&config.store.path)?);
    info!(
        "event=store_open module=server status=ok path={}",
        config.store.path
    );

    let app = router(AppState::new(store));
    let listener = TcpListener::bind(config.server_addr()).await?;
    info!(
        "event=server_start module=server status=ok addr={}",
        config.server_addr()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("event=signal module=server status=error error={}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                log::error!("event=signal module=server status=error error={}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
