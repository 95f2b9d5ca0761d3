use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::types::ClientFields;

pub const CLIENT_NAME_MAX_LEN: usize = 200;
pub const CLIENT_DOCUMENT_MAX_LEN: usize = 14;
pub const CLIENT_PHONE_MAX_LEN: usize = 11;

/// Field name -> human-readable constraint violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Required (not blank) and at most `max` characters.
fn check_required_len(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("{field} is required"));
    } else if value.chars().count() > max {
        errors.add(field, format!("{field} must be at most {max} characters"));
    }
}

pub fn validate_client(fields: &ClientFields) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_required_len(&mut errors, "name", &fields.name, CLIENT_NAME_MAX_LEN);
    check_required_len(&mut errors, "document", &fields.document, CLIENT_DOCUMENT_MAX_LEN);
    check_required_len(&mut errors, "phone", &fields.phone, CLIENT_PHONE_MAX_LEN);
    errors.into_result()
}

/// Shape check for register/login payloads. Password strength is the
/// identity service's concern (see [`PasswordPolicy`]).
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if email.trim().is_empty() {
        errors.add("email", "email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "email is not a valid email address");
    }
    if password.is_empty() {
        errors.add("password", "password is required");
    }
    errors.into_result()
}

/// `local@domain.tld`: one `@`, no whitespace, dotted domain of
/// alphanumeric/hyphen labels.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}

/// Password strength rules applied on registration.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
        }
    }
}

impl PasswordPolicy {
    /// Every rule `password` breaks, in a stable order.
    pub fn violations(&self, password: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if password.chars().count() < self.min_length {
            errors.push(format!(
                "password must be at least {} characters",
                self.min_length
            ));
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("password must contain a digit".to_owned());
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            errors.push("password must contain a lowercase letter".to_owned());
        }
        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            errors.push("password must contain an uppercase letter".to_owned());
        }
        if self.require_non_alphanumeric && password.chars().all(char::is_alphanumeric) {
            errors.push("password must contain a non-alphanumeric character".to_owned());
        }
        errors
    }
}
