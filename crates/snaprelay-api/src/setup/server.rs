//! Server startup and graceful shutdown

use std::future::Future;

use anyhow::Result;
use axum::Router;
use snaprelay_core::Config;
use tokio::net::TcpListener;

/// Bind the configured port and serve until SIGINT or SIGTERM.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    tracing::info!(addr = %addr, "Starting server");

    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(
        max_upload_mb = config.max_upload_size_bytes() / 1024 / 1024,
        smtp_host = %config.smtp_host(),
        smtp_port = config.smtp_port(),
        smtp_tls = %config.smtp_tls(),
        recipient = %config.recipient(),
        strict_email_validation = config.strict_email_validation(),
        "Server ready and accepting connections"
    );

    serve_until(listener, app, shutdown_signal()).await
}

/// Serve `app` on `listener` until `shutdown` resolves, then let in-flight uploads
/// finish their relay attempt before returning.
pub async fn serve_until<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on the first stop request from the process supervisor.
///
/// A listener that cannot be installed is logged and never fires, so the other one
/// still stops the server.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    tracing::info!(signal, "Stop requested, draining in-flight uploads");
}
