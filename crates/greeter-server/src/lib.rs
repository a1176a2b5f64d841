//! # greeter-server
//!
//! tonic gRPC surface for the greeter service. All behaviour lives in
//! [`greeter_core`]; this crate decodes wire messages into core types, runs
//! the handlers, and encodes replies and errors back.
//!
//! ## Quick start
//!
//! ```ignore
//! use greeter_server::{GreeterService, GrpcServerConfig, RouterExt, ServerExt};
//! use greeter_server::proto::greeter_server::GreeterServer;
//! use greeter_core::{ServerStats, SystemClock};
//! use std::sync::Arc;
//! use tonic::transport::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config: GrpcServerConfig = GrpcServerConfig::builder().with_dotenv().build()?;
//!     let stats = Arc::new(ServerStats::new());
//!     let greeter = GreeterService::new(stats, SystemClock, config.stream_buffer_size);
//!
//!     Server::builder()
//!         .with_default_layers()
//!         .add_service(GreeterServer::new(greeter))
//!         .serve_with(&config)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod layer;
pub mod logging;
pub mod server;
pub mod service;

/// Generated protobuf code for the `greeter` package.
pub mod proto {
    tonic::include_proto!("greeter");

    /// File descriptor set for server reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("greeter_descriptor");
}

pub use config::{ConfigBuilder, ConfigError, GrpcServerConfig};
pub use error::{into_status, ServerError};
pub use layer::{RequestIdLayer, TraceLayer, REQUEST_ID_HEADER};
pub use logging::{init_logging, init_logging_from_env, LogFormat};
pub use server::{shutdown_signal, RouterExt, ServerExt};
pub use service::GreeterService;
