//! Server extension traits for tonic.

use std::net::SocketAddr;
use tonic::transport::server::Router;

use crate::config::GrpcServerConfig;
use crate::error::ServerError;
use crate::layer::{RequestIdLayer, TraceLayer};

/// Extension trait for `tonic::transport::Server`.
pub trait ServerExt: Sized {
    type WithLayers;

    /// Applies the default middleware stack (request id, then tracing).
    fn with_default_layers(self) -> Self::WithLayers;
}

impl<L> ServerExt for tonic::transport::server::Server<L> {
    type WithLayers = tonic::transport::server::Server<
        tower::layer::util::Stack<TraceLayer, tower::layer::util::Stack<RequestIdLayer, L>>,
    >;

    fn with_default_layers(self) -> Self::WithLayers {
        self.layer(RequestIdLayer::new()).layer(TraceLayer::new())
    }
}

/// Extension trait for `tonic::transport::server::Router`.
pub trait RouterExt<L>: Sized {
    /// Serve at the configured address with graceful shutdown.
    fn serve_with(
        self,
        config: &GrpcServerConfig,
    ) -> impl std::future::Future<Output = Result<(), ServerError>> + Send;

    /// Serve at a specific address with graceful shutdown.
    fn serve_at(
        self,
        addr: SocketAddr,
    ) -> impl std::future::Future<Output = Result<(), ServerError>> + Send;
}

impl<L> RouterExt<L> for Router<L>
where
    L: tower::Layer<tonic::service::Routes> + Clone + Send + 'static,
    L::Service: tower::Service<
            http::Request<tonic::body::BoxBody>,
            Response = http::Response<tonic::body::BoxBody>,
        > + Clone
        + Send
        + 'static,
    <L::Service as tower::Service<http::Request<tonic::body::BoxBody>>>::Future: Send,
    <L::Service as tower::Service<http::Request<tonic::body::BoxBody>>>::Error:
        Into<Box<dyn std::error::Error + Send + Sync>> + Send,
{
    async fn serve_with(self, config: &GrpcServerConfig) -> Result<(), ServerError> {
        let addr = config.socket_addr().map_err(ServerError::InvalidAddress)?;
        self.serve_at(addr).await
    }

    async fn serve_at(self, addr: SocketAddr) -> Result<(), ServerError> {
        tracing::info!(addr = %addr, "greeter server listening");

        self.serve_with_shutdown(addr, shutdown_signal())
            .await
            .map_err(ServerError::Transport)?;

        tracing::info!("greeter server shutdown complete");
        Ok(())
    }
}

/// Wait for SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal_name = tokio::select! {
        _ = async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler")
        } => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    tracing::info!(signal = signal_name, "starting graceful shutdown");
}
