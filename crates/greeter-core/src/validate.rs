//! Name validation.

/// Maximum accepted name length, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Result of validating a candidate name.
///
/// Violations accumulate; a name is valid iff no error was recorded. The
/// error strings are stable for identical input, so callers may join them
/// into a deterministic message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '_'
}

/// Validate a user-supplied name.
///
/// Rejects empty or whitespace-only names, names longer than
/// [`MAX_NAME_LEN`] characters, and names containing anything other than
/// alphanumerics, whitespace, `-`, or `_`. Total and deterministic: never
/// panics, no side effects.
pub fn validate_name(name: &str) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    if name.trim().is_empty() {
        outcome
            .errors
            .push("name must not be empty or whitespace-only".to_string());
    }

    if name.chars().count() > MAX_NAME_LEN {
        outcome.errors.push(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        ));
    }

    if !name.chars().all(is_allowed_char) {
        outcome.errors.push(
            "name may only contain letters, digits, spaces, '-' and '_'".to_string(),
        );
    }

    outcome
}
