//! Error mapping at the transport boundary.

use greeter_core::HandlerError;
use tonic::{Code, Status};

/// Convert a handler error into its boundary `Status`.
///
/// Validation failures carry their accumulated messages to the caller as
/// `InvalidArgument`. Internal faults are logged here in full and surfaced
/// as a generic `Internal` status; the detail never crosses the boundary.
pub fn into_status(err: HandlerError) -> Status {
    match &err {
        HandlerError::InvalidInput(_) => {
            Status::new(Code::InvalidArgument, err.joined_messages())
        }
        HandlerError::Internal(detail) => {
            tracing::error!(detail = %detail, "internal fault while handling request");
            Status::new(Code::Internal, "internal server error")
        }
    }
}

/// Errors from running the server itself.
#[derive(Debug)]
pub enum ServerError {
    InvalidAddress(std::net::AddrParseError),
    Transport(tonic::transport::Error),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddress(e) => write!(f, "invalid listen address: {}", e),
            Self::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}
