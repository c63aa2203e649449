use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{LoginInput, RegisterInput};

/// Accumulated validation failures, in field order.
///
/// API responses report the first one; web pages render all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First failure, or empty string when there is none.
    pub fn first(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    pub fn all(&self) -> &[String] {
        &self.0
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Check a registration payload. Fields are expected to be trimmed
/// already; the password is taken verbatim.
pub fn validate_register(input: &RegisterInput) -> Violations {
    let mut violations = Violations::default();
    if input.name.is_empty() {
        violations.push("Name is required");
    }
    check_email(&mut violations, &input.email);
    if input.password.is_empty() {
        violations.push("Password is required");
    }
    violations
}

/// Check a login payload. Only presence is required; a malformed address
/// is left to fail the account lookup.
pub fn validate_login(input: &LoginInput) -> Violations {
    let mut violations = Violations::default();
    if input.email.is_empty() {
        violations.push("Email is required");
    }
    if input.password.is_empty() {
        violations.push("Password is required");
    }
    violations
}

fn check_email(violations: &mut Violations, email: &str) {
    if email.is_empty() {
        violations.push("Email is required");
    } else if !is_valid_email(email) {
        violations.push("Invalid email");
    }
}
