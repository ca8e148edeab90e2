//! hitcount server
//!
//! - Env config, fatal on any invalid value
//! - Optional slow start before binding
//! - Graceful shutdown on Ctrl+C / SIGTERM

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hitcount_server::{app_state::AppState, config, context, router, VERSION};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let started = context::StartTime::now();
    let hostname = context::host::resolve();

    let cfg = match config::load_from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%hostname, error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let listen = cfg.server.listen_addr();
    let port = cfg.server.port;
    let slow_start = cfg.server.slow_start();

    tracing::info!(
        %hostname,
        version = VERSION,
        backend = %cfg.store.backend,
        mode = %cfg.counter.mode,
        slow_start_secs = slow_start.as_secs(),
        "starting hitcount"
    );

    let state = match AppState::from_config(cfg, hostname.clone(), started) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(%hostname, error = %e, "store setup failed");
            return ExitCode::FAILURE;
        }
    };
    let app = router::build_router(state);

    tokio::time::sleep(slow_start).await;

    let listener = match tokio::net::TcpListener::bind(&listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%hostname, %listen, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%hostname, %listen, "hitcount {VERSION} started, see http://127.0.0.1:{port}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%hostname, error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
