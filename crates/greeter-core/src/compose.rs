//! Greeting and farewell composition.
//!
//! Pure functions: given the same name, style, and clock reading they always
//! produce the same string. Phrase selection order is fixed — admin first,
//! then long names, then test users, then the default — and the time-of-day
//! bucketing is part of the public contract (tests pin the boundaries).

use chrono::{DateTime, Timelike, Utc};

const DEFAULT_GREETING_STYLE: &str = "Hello";
const DEFAULT_FAREWELL_STYLE: &str = "Goodbye";

/// Names longer than this get the long-name phrase.
const LONG_NAME_THRESHOLD: usize = 15;

/// Time-of-day bucket derived from the hour of an injected clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket an hour: [5,12) morning, [12,17) afternoon, [17,22) evening,
    /// everything else night. Lower bounds inclusive, upper exclusive.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Morning => "Good morning!",
            Self::Afternoon => "Good afternoon!",
            Self::Evening => "Good evening!",
            Self::Night => "Good night!",
        }
    }
}

/// The greeting appended when a time-of-day greeting is requested.
pub fn time_of_day_phrase(hour: u32) -> &'static str {
    TimeOfDay::from_hour(hour).phrase()
}

enum NameFlavor {
    Admin,
    Long,
    Test,
    Default,
}

impl NameFlavor {
    fn of(name: &str) -> Self {
        if name.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else if name.chars().count() > LONG_NAME_THRESHOLD {
            Self::Long
        } else if name.to_lowercase().contains("test") {
            Self::Test
        } else {
            Self::Default
        }
    }
}

fn style_or<'a>(style: Option<&'a str>, default: &'a str) -> &'a str {
    match style {
        Some(s) if !s.is_empty() => s,
        _ => default,
    }
}

/// Compose a greeting for an already-validated name.
///
/// `style` replaces the leading "Hello" when set and non-empty. When
/// `include_time` is set, the time-of-day phrase for `now` is appended.
pub fn compose_greeting(
    name: &str,
    style: Option<&str>,
    include_time: bool,
    now: DateTime<Utc>,
) -> String {
    let style = style_or(style, DEFAULT_GREETING_STYLE);

    let mut message = match NameFlavor::of(name) {
        NameFlavor::Admin => {
            format!("{style}, Administrator {name}! All systems are at your service.")
        }
        NameFlavor::Long => format!("{style}, {name}! That's an impressive name."),
        NameFlavor::Test => format!("{style}, {name}! Your test account is ready."),
        NameFlavor::Default => format!("{style}, {name}! Welcome."),
    };

    if include_time {
        message.push(' ');
        message.push_str(time_of_day_phrase(now.hour()));
    }

    message
}

/// Compose a farewell for an already-validated name.
///
/// `style` replaces the leading "Goodbye" when set and non-empty. The
/// closing line follows the clock: day buckets wish a great day, evening
/// and night buckets a good night.
pub fn compose_farewell(name: &str, style: Option<&str>, now: DateTime<Utc>) -> String {
    let style = style_or(style, DEFAULT_FAREWELL_STYLE);

    let body = match NameFlavor::of(name) {
        NameFlavor::Admin => format!("{style}, Administrator {name}. Session closed."),
        NameFlavor::Long => format!("{style}, {name}. It was a pleasure."),
        NameFlavor::Test => format!("{style}, {name}. Test run complete."),
        NameFlavor::Default => format!("{style}, {name}."),
    };

    let closing = match TimeOfDay::from_hour(now.hour()) {
        TimeOfDay::Morning | TimeOfDay::Afternoon => "Have a great day!",
        TimeOfDay::Evening | TimeOfDay::Night => "Have a good night!",
    };

    format!("{body} {closing}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, hour, 30, 0).unwrap()
    }

    #[test]
    fn default_greeting() {
        let msg = compose_greeting("Bob", None, false, at_hour(10));
        assert_eq!(msg, "Hello, Bob! Welcome.");
    }

    #[test]
    fn custom_style_leads_the_message() {
        let msg = compose_greeting("Bob", Some("Hi"), false, at_hour(10));
        assert!(msg.starts_with("Hi, Bob!"), "got {msg:?}");
    }

    #[test]
    fn empty_style_falls_back_to_default() {
        let msg = compose_greeting("Bob", Some(""), false, at_hour(10));
        assert!(msg.starts_with("Hello, Bob!"));
    }

    #[test]
    fn admin_in_any_case_gets_the_admin_phrase() {
        for name in ["admin", "Admin", "ADMIN", "aDmIn"] {
            let msg = compose_greeting(name, None, false, at_hour(10));
            assert!(msg.contains("Administrator"), "{name:?} -> {msg:?}");
        }
    }

    #[test]
    fn long_names_get_the_long_name_phrase() {
        let msg = compose_greeting("Bartholomew X Smith", None, false, at_hour(10));
        assert!(msg.contains("impressive name"), "got {msg:?}");
    }

    #[test]
    fn long_check_runs_before_test_check() {
        // Contains "test" but is over the length threshold.
        let msg = compose_greeting("the greatest tester", None, false, at_hour(10));
        assert!(msg.contains("impressive name"), "got {msg:?}");
    }

    #[test]
    fn test_users_get_the_test_phrase() {
        for name in ["Test99", "my-test", "TESTER"] {
            let msg = compose_greeting(name, None, false, at_hour(10));
            assert!(msg.contains("test account"), "{name:?} -> {msg:?}");
        }
    }

    #[test]
    fn time_phrase_appended_when_requested() {
        let msg = compose_greeting("Bob", None, true, at_hour(9));
        assert!(msg.ends_with("Good morning!"), "got {msg:?}");

        let msg = compose_greeting("Bob", None, true, at_hour(23));
        assert!(msg.ends_with("Good night!"), "got {msg:?}");

        let msg = compose_greeting("Bob", None, false, at_hour(9));
        assert!(!msg.contains("Good morning"));
    }

    #[test]
    fn bucket_boundaries_are_exact() {
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn time_of_day_phrases() {
        assert_eq!(time_of_day_phrase(9), "Good morning!");
        assert_eq!(time_of_day_phrase(12), "Good afternoon!");
        assert_eq!(time_of_day_phrase(17), "Good evening!");
        assert_eq!(time_of_day_phrase(23), "Good night!");
    }

    #[test]
    fn default_farewell() {
        let msg = compose_farewell("Bob", None, at_hour(10));
        assert_eq!(msg, "Goodbye, Bob. Have a great day!");
    }

    #[test]
    fn farewell_style_and_admin() {
        let msg = compose_farewell("admin", Some("Farewell"), at_hour(10));
        assert!(msg.starts_with("Farewell, Administrator admin."), "got {msg:?}");
    }

    #[test]
    fn farewell_closing_follows_the_clock() {
        assert!(compose_farewell("Bob", None, at_hour(14)).ends_with("Have a great day!"));
        assert!(compose_farewell("Bob", None, at_hour(20)).ends_with("Have a good night!"));
        assert!(compose_farewell("Bob", None, at_hour(2)).ends_with("Have a good night!"));
    }

    #[test]
    fn composition_is_deterministic() {
        let now = at_hour(9);
        assert_eq!(
            compose_greeting("Bob", Some("Hi"), true, now),
            compose_greeting("Bob", Some("Hi"), true, now)
        );
    }
}
