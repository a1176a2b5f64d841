//! Domain request/reply types.
//!
//! These are the decoded shapes the handlers work with. The transport crate
//! converts its wire messages into these and back; nothing here knows about
//! protobuf.

/// A decoded greeting request. Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GreetRequest {
    pub name: String,
    /// Greeting word to lead with. Unset or empty means "Hello".
    pub greeting_style: Option<String>,
    pub include_time_greeting: bool,
    /// Caller-declared category; informational only, never trusted for the
    /// admin check (that goes by name).
    pub user_category: Option<String>,
}

/// A decoded farewell request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoodbyeRequest {
    pub name: String,
    /// Farewell word to lead with. Unset or empty means "Goodbye".
    pub farewell_style: Option<String>,
}

/// Reply produced by the say-hello and say-goodbye handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetReply {
    pub message: String,
    pub processing_time_ms: u64,
    /// RFC 3339 UTC timestamp taken from the injected clock.
    pub server_timestamp: String,
    /// Empty unless a time-of-day greeting was requested.
    pub time_of_day_phrase: String,
    pub is_admin: bool,
}

/// Snapshot-style reply for the get-server-info handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerInfo {
    pub uptime_seconds: u64,
    pub total_requests: u64,
    pub average_latency_ms: f64,
    pub server_timestamp: String,
}

/// Derived user classification returned by validate-user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCategory {
    Admin,
    Test,
    Regular,
    /// No name supplied, so no classification applies.
    Unspecified,
}

impl UserCategory {
    /// Classify a name. Admin wins over test when both match.
    pub fn from_name(name: &str) -> Self {
        if name.is_empty() {
            Self::Unspecified
        } else if name.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else if name.to_lowercase().contains("test") {
            Self::Test
        } else {
            Self::Regular
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Test => "test",
            Self::Regular => "regular",
            Self::Unspecified => "unspecified",
        }
    }
}

/// Outcome of the validate-user handler. Always produced, even for names the
/// validator rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub category: UserCategory,
}
