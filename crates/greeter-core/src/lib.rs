//! # greeter-core
//!
//! Transport-free core of the greeter service.
//!
//! This crate holds everything that does not depend on the wire: the name
//! [`validate`][validate_name], the greeting [composer](compose), the
//! process-wide [`ServerStats`] tracker, and the per-RPC [`GreeterHandler`]
//! orchestrating them. The gRPC surface lives in `greeter-server` and treats
//! this crate as the single source of behaviour.
//!
//! Time is injected through the [`Clock`] trait so every function here is
//! deterministic under test.

mod clock;
mod compose;
mod error;
mod handler;
mod stats;
mod types;
mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use compose::{compose_farewell, compose_greeting, time_of_day_phrase, TimeOfDay};
pub use error::HandlerError;
pub use handler::GreeterHandler;
pub use stats::{ServerStats, StatsSnapshot, RECENT_LATENCY_CAPACITY};
pub use types::{
    GoodbyeRequest, GreetReply, GreetRequest, ServerInfo, UserCategory, UserReport,
};
pub use validate::{validate_name, ValidationOutcome, MAX_NAME_LEN};
