//! Per-RPC request handlers.
//!
//! One struct implements every RPC's orchestration: validate, compose,
//! record stats, build the reply. Handlers own nothing mutable themselves;
//! the shared [`ServerStats`] arrives by `Arc` and the clock is injected.

use std::sync::Arc;
use std::time::Instant;

use chrono::{SecondsFormat, Timelike};

use crate::clock::{Clock, SystemClock};
use crate::compose::{compose_farewell, compose_greeting, time_of_day_phrase};
use crate::error::HandlerError;
use crate::stats::ServerStats;
use crate::types::{
    GoodbyeRequest, GreetReply, GreetRequest, ServerInfo, UserCategory, UserReport,
};
use crate::validate::validate_name;

/// Orchestrates Validator → Composer → Stats for every RPC.
#[derive(Debug)]
pub struct GreeterHandler<C = SystemClock> {
    stats: Arc<ServerStats>,
    clock: C,
}

impl<C: Clock> GreeterHandler<C> {
    pub fn new(stats: Arc<ServerStats>, clock: C) -> Self {
        Self { stats, clock }
    }

    pub fn stats(&self) -> &Arc<ServerStats> {
        &self.stats
    }

    /// Handle a greeting request.
    ///
    /// Rejected names return before any stats mutation; accepted ones record
    /// the composer's wall time and bump the request total.
    pub fn say_hello(&self, req: &GreetRequest) -> Result<GreetReply, HandlerError> {
        let outcome = validate_name(&req.name);
        if !outcome.is_valid() {
            tracing::debug!(errors = ?outcome.errors, "rejected greet request");
            return Err(HandlerError::InvalidInput(outcome.errors));
        }

        let started = Instant::now();
        let now = self.clock.now();
        let message = compose_greeting(
            &req.name,
            req.greeting_style.as_deref(),
            req.include_time_greeting,
            now,
        );
        let time_phrase = if req.include_time_greeting {
            time_of_day_phrase(now.hour())
        } else {
            ""
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        self.stats.record_latency(elapsed_ms);
        self.stats.increment_total();

        Ok(GreetReply {
            message,
            processing_time_ms: elapsed_ms,
            server_timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            time_of_day_phrase: time_phrase.to_string(),
            is_admin: UserCategory::from_name(&req.name) == UserCategory::Admin,
        })
    }

    /// Handle a farewell request. Same pipeline as [`say_hello`][Self::say_hello].
    pub fn say_goodbye(&self, req: &GoodbyeRequest) -> Result<GreetReply, HandlerError> {
        let outcome = validate_name(&req.name);
        if !outcome.is_valid() {
            tracing::debug!(errors = ?outcome.errors, "rejected goodbye request");
            return Err(HandlerError::InvalidInput(outcome.errors));
        }

        let started = Instant::now();
        let now = self.clock.now();
        let message = compose_farewell(&req.name, req.farewell_style.as_deref(), now);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        self.stats.record_latency(elapsed_ms);
        self.stats.increment_total();

        Ok(GreetReply {
            message,
            processing_time_ms: elapsed_ms,
            server_timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            time_of_day_phrase: String::new(),
            is_admin: UserCategory::from_name(&req.name) == UserCategory::Admin,
        })
    }

    /// Uptime and counter snapshot. Read-only: the reported totals never
    /// include the info request itself.
    pub fn server_info(&self) -> ServerInfo {
        let snapshot = self.stats.snapshot();
        ServerInfo {
            uptime_seconds: self.stats.uptime().as_secs(),
            total_requests: snapshot.total_requests,
            average_latency_ms: snapshot.average_latency_ms,
            server_timestamp: self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Run the validator without rejecting: the outcome travels in the reply
    /// together with the derived user category.
    pub fn validate_user(&self, name: &str) -> UserReport {
        let started = Instant::now();
        let outcome = validate_name(name);
        let category = UserCategory::from_name(name);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        self.stats.record_latency(elapsed_ms);
        self.stats.increment_total();

        UserReport {
            is_valid: outcome.is_valid(),
            errors: outcome.errors,
            category,
        }
    }
}
