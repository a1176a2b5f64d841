//! Greeter server binary.
//!
//! ```bash
//! cargo run -p greeter-server
//! ```
//!
//! Test with grpcurl:
//! ```bash
//! grpcurl -plaintext -d '{"name": "World"}' localhost:50051 greeter.Greeter/SayHello
//! grpcurl -plaintext localhost:50051 grpc.health.v1.Health/Check
//! ```

use std::sync::Arc;

use greeter_core::{ServerStats, SystemClock};
use greeter_server::proto::greeter_server::GreeterServer;
use greeter_server::{
    init_logging_from_env, GreeterService, GrpcServerConfig, RouterExt, ServerExt,
};
use tonic::transport::Server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_from_env();

    let config: GrpcServerConfig = GrpcServerConfig::builder().with_dotenv().build()?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "starting greeter server"
    );

    // Shared by every handler; the only mutable state in the process.
    let stats = Arc::new(ServerStats::new());
    let greeter = GreeterService::new(Arc::clone(&stats), SystemClock, config.stream_buffer_size);

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<GreeterServer<GreeterService>>()
        .await;

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(greeter_server::proto::FILE_DESCRIPTOR_SET)
        .build_v1()?;

    Server::builder()
        .timeout(config.request_timeout())
        .tcp_keepalive(config.tcp_keepalive())
        .tcp_nodelay(config.tcp_nodelay)
        .with_default_layers()
        .add_service(health_service)
        .add_service(reflection_service)
        .add_service(GreeterServer::new(greeter))
        .serve_with(&config)
        .await?;

    Ok(())
}
