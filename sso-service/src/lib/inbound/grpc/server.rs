use std::future::Future;
use std::net::SocketAddr;

use tonic::transport::server::Router;
use tonic::transport::Server;

use super::grpc_auth_server::AuthGrpcService;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::AuthServer;

/// Build the tonic router serving the `sso.Auth` service.
pub fn router<S>(grpc_service: AuthGrpcService<S>) -> Router
where
    S: AuthServicePort,
{
    Server::builder()
        .trace_fn(|request| {
            tracing::info_span!(
                "grpc_request",
                uri = %request.uri(),
            )
        })
        .add_service(AuthServer::new(grpc_service))
}

/// Serve on `address` until `shutdown` resolves, then drain in-flight calls.
pub async fn run<S, F>(
    grpc_service: AuthGrpcService<S>,
    address: SocketAddr,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    S: AuthServicePort,
    F: Future<Output = ()>,
{
    tracing::info!(address = %address, protocol = "grpc", "gRPC server listening");

    router(grpc_service)
        .serve_with_shutdown(address, shutdown)
        .await?;

    tracing::info!(address = %address, "gRPC server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received, stopping gRPC server");
}
