//! promsynth: serve synthetic counters, gauges, histograms and summaries.
//!
//! Exit status: 2 on configuration errors (nothing is bound), 1 when the
//! listener or server fails, 0 after a signal-driven shutdown.

use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use promsynth_server::{app_state::AppState, cli::Cli, obs, router, scheduler::Scheduler};

const EXIT_CONFIG: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    obs::init_tracing(cli.log_format);

    let state = match cli.settings().and_then(AppState::new) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), "{e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let settings = state.settings().clone();
    if settings.random && settings.selection == promsynth_core::KindSelection::All {
        tracing::info!("producing randomized metrics per type");
    } else {
        tracing::info!(count = settings.count, selection = %settings.selection, "producing metrics per type");
    }

    let scheduler = Scheduler::start(state.registry(), settings.interval);

    let listener = match TcpListener::bind(&settings.listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(listen = %settings.listen, error = %e, "failed to bind");
            scheduler.shutdown().await;
            return ExitCode::FAILURE;
        }
    };
    let shutdown = shutdown_signal();
    let local = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| settings.listen.clone());
    tracing::info!(listen = %local, interval_secs = settings.interval.as_secs(), "promsynth serving");

    let app = router::build_router(state);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    scheduler.shutdown().await;

    match served {
        Ok(()) => {
            tracing::info!("server exited");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM. The SIGTERM handler is registered when this
/// is called, before the server reports readiness.
fn shutdown_signal() -> impl std::future::Future<Output = ()> {
    #[cfg(unix)]
    let terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate());

    async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async move {
            match terminate {
                Ok(mut sig) => {
                    sig.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to install SIGTERM handler");
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
}
