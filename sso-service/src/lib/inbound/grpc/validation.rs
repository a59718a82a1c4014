use std::fmt;

use email_address::EmailAddress;
use email_address::Options;

use crate::proto::IsAdminRequest;
use crate::proto::LoginRequest;
use crate::proto::RegisterRequest;

/// Rule a request field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
    Positive,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => f.write_str("required"),
            Rule::Email => f.write_str("email"),
            Rule::MinLength(min) => write!(f, "min={}", min),
            Rule::MaxLength(max) => write!(f, "max={}", max),
            Rule::Positive => f.write_str("gt=0"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field '{}' failed validation: {}", self.field, self.rule)
    }
}

/// Ordered list of violations, at most one per field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn check(&mut self, field: &'static str, failed: Option<Rule>) {
        if let Some(rule) = failed {
            self.0.push(Violation { field, rule });
        }
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Structural checks on inbound requests, run before any business logic.
///
/// Each field reports the first rule it fails, in declaration order.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    password_min_length: usize,
    password_max_length: usize,
}

impl RequestValidator {
    pub const PASSWORD_MIN_LENGTH: usize = 6;
    pub const PASSWORD_MAX_LENGTH: usize = 32;

    pub fn new() -> Self {
        Self {
            password_min_length: Self::PASSWORD_MIN_LENGTH,
            password_max_length: Self::PASSWORD_MAX_LENGTH,
        }
    }

    pub fn login(&self, request: &LoginRequest) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check("email", email_rules(&request.email));
        errors.check(
            "password",
            required(&request.password).or_else(|| self.min_length(&request.password)),
        );
        errors.check("app_id", positive(i64::from(request.app_id)));
        errors.into_result()
    }

    pub fn register(&self, request: &RegisterRequest) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check("email", email_rules(&request.email));
        errors.check(
            "password",
            required(&request.password)
                .or_else(|| self.min_length(&request.password))
                .or_else(|| self.max_length(&request.password)),
        );
        errors.into_result()
    }

    pub fn is_admin(&self, request: &IsAdminRequest) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check("user_id", positive(request.user_id));
        errors.into_result()
    }

    fn min_length(&self, value: &str) -> Option<Rule> {
        (value.chars().count() < self.password_min_length)
            .then_some(Rule::MinLength(self.password_min_length))
    }

    fn max_length(&self, value: &str) -> Option<Rule> {
        (value.chars().count() > self.password_max_length)
            .then_some(Rule::MaxLength(self.password_max_length))
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn required(value: &str) -> Option<Rule> {
    value.is_empty().then_some(Rule::Required)
}

// Bare addresses only; "Name <addr>" forms are rejected.
fn email_rules(value: &str) -> Option<Rule> {
    let options = Options::default().without_display_text();
    required(value).or_else(|| {
        EmailAddress::parse_with_options(value, options)
            .err()
            .map(|_| Rule::Email)
    })
}

// Zero is the protobuf default, so it reads as a missing field.
fn positive(value: i64) -> Option<Rule> {
    match value {
        0 => Some(Rule::Required),
        v if v < 0 => Some(Rule::Positive),
        _ => None,
    }
}
