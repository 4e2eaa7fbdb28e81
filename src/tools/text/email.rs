//! Syntactic email address validation.
//!
//! Accepts dot-atom local parts only; quoted local parts and IP-literal
//! domains are reported as invalid.

use serde::{Deserialize, Serialize};

use crate::tools::ToolError;

const MAX_LOCAL: usize = 64;
const MAX_TOTAL: usize = 254;
const MAX_LABEL: usize = 63;
const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EmailResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub problems: Vec<String>,
}

pub fn validate(req: EmailRequest) -> Result<EmailResponse, ToolError> {
    Ok(check(req.email.trim()))
}

#[must_use]
pub fn check(email: &str) -> EmailResponse {
    let mut problems = Vec::new();
    if email.is_empty() {
        problems.push("address is empty".to_owned());
        return EmailResponse { valid: false, local: None, domain: None, problems };
    }
    if email.chars().count() > MAX_TOTAL {
        problems.push(format!("address is longer than {MAX_TOTAL} characters"));
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        problems.push("missing `@`".to_owned());
        return EmailResponse { valid: false, local: None, domain: None, problems };
    };

    check_local(local, &mut problems);
    check_domain(domain, &mut problems);

    EmailResponse {
        valid: problems.is_empty(),
        local: Some(local.to_owned()),
        domain: Some(domain.to_ascii_lowercase()),
        problems,
    }
}

fn check_local(local: &str, problems: &mut Vec<String>) {
    if local.is_empty() {
        problems.push("local part is empty".to_owned());
        return;
    }
    if local.len() > MAX_LOCAL {
        problems.push(format!("local part is longer than {MAX_LOCAL} characters"));
    }
    if let Some(bad) = local.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || LOCAL_SPECIALS.contains(*c))) {
        problems.push(format!("local part contains `{bad}`"));
    }
    if local.starts_with('.') || local.ends_with('.') {
        problems.push("local part starts or ends with a dot".to_owned());
    }
    if local.contains("..") {
        problems.push("local part contains consecutive dots".to_owned());
    }
}

fn check_domain(domain: &str, problems: &mut Vec<String>) {
    if domain.is_empty() {
        problems.push("domain is empty".to_owned());
        return;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        problems.push("domain needs at least one dot".to_owned());
    }
    for label in &labels {
        if label.is_empty() {
            problems.push("domain contains an empty label".to_owned());
            continue;
        }
        if label.len() > MAX_LABEL {
            problems.push(format!("domain label `{label}` is longer than {MAX_LABEL} characters"));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            problems.push(format!("domain label `{label}` contains invalid characters"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            problems.push(format!("domain label `{label}` starts or ends with a hyphen"));
        }
    }
    if let Some(tld) = labels.last().filter(|_| labels.len() >= 2) {
        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            problems.push("top-level domain must be at least two letters".to_owned());
        }
    }
}

#[cfg(test)]
#[path = "email_test.rs"]
mod tests;
