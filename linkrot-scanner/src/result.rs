use serde::{Deserialize, Serialize};
use std::fmt;

/// An external URL together with the crawled page that referenced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalLink {
    pub local_page: String,
    pub external_url: String,
}

impl ExternalLink {
    pub fn new(local_page: impl Into<String>, external_url: impl Into<String>) -> Self {
        Self {
            local_page: local_page.into(),
            external_url: external_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The server answered, whatever the status code was
    Status { status_code: u16 },
    /// The request never produced a response (DNS, connect, TLS...)
    Error { message: String },
}

/// Outcome of verifying one unique external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub url: String,
    pub source_page: String,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl CheckResult {
    pub fn status(link: &ExternalLink, status_code: u16) -> Self {
        Self {
            url: link.external_url.clone(),
            source_page: link.local_page.clone(),
            outcome: CheckOutcome::Status { status_code },
        }
    }

    pub fn error(link: &ExternalLink, message: String) -> Self {
        Self {
            url: link.external_url.clone(),
            source_page: link.local_page.clone(),
            outcome: CheckOutcome::Error { message },
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.outcome {
            CheckOutcome::Status { status_code } => Some(status_code),
            CheckOutcome::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Error { .. })
    }
}

/// Renders the tab separated report line.
impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            CheckOutcome::Status { status_code } => write!(f, "{}\t{}", status_code, self.url),
            CheckOutcome::Error { message } => write!(f, "ERROR\t{}\t{}", self.url, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let link = ExternalLink::new("http://x/", "http://ext.com/1");
        let result = CheckResult::status(&link, 404);
        assert_eq!(result.to_string(), "404\thttp://ext.com/1");
        assert_eq!(result.status_code(), Some(404));
        assert!(!result.is_error());
    }

    #[test]
    fn test_error_line() {
        let link = ExternalLink::new("http://x/", "http://nope.invalid");
        let result = CheckResult::error(&link, "dns error".to_string());
        assert_eq!(result.to_string(), "ERROR\thttp://nope.invalid\tdns error");
        assert_eq!(result.status_code(), None);
        assert!(result.is_error());
    }

    #[test]
    fn test_json_shape() {
        let link = ExternalLink::new("http://x/b", "http://ext.com/2");
        let value = serde_json::to_value(CheckResult::status(&link, 500)).unwrap();
        assert_eq!(value["url"], "http://ext.com/2");
        assert_eq!(value["source_page"], "http://x/b");
        assert_eq!(value["outcome"], "status");
        assert_eq!(value["status_code"], 500);
    }
}
