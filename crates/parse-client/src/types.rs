use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ErrorCode};

/// Body of `POST /v1/parse`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ParseOptions>,
}

impl ParseRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: None,
            options: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Same content and format with every optional processing flag dropped.
    pub fn simplified(&self) -> Self {
        Self {
            content: self.content.clone(),
            format: self.format.clone(),
            options: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    pub extract_metadata: bool,
    pub strict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "ok" | "healthy")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSuccess {
    /// The service's JSON payload, untouched.
    pub data: Value,
    /// Requests sent, including the retry.
    pub attempts: u32,
    /// Whether the data came from the simplified retry.
    pub simplified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseFailure {
    pub code: ErrorCode,
    pub message: String,
    pub recovery: String,
    pub attempts: u32,
}

impl ParseFailure {
    pub fn from_error(err: &ClientError, attempts: u32) -> Self {
        let code = err.code();
        Self {
            code,
            message: err.to_string(),
            recovery: code.recovery_suggestion().to_string(),
            attempts,
        }
    }
}

/// Outcome of `ParseClient::parse`. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ParseResult {
    Parsed(ParseSuccess),
    Failed(ParseFailure),
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ParseResult::Parsed(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ParseResult::Parsed(success) => Some(&success.data),
            ParseResult::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            ParseResult::Parsed(_) => None,
            ParseResult::Failed(failure) => Some(failure),
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            ParseResult::Parsed(success) => success.attempts,
            ParseResult::Failed(failure) => failure.attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplified_drops_options_only() {
        let request = ParseRequest::new("a: 1")
            .with_format("yaml")
            .with_options(ParseOptions { strict: true, ..ParseOptions::default() });
        let simple = request.simplified();
        assert_eq!(simple.content, "a: 1");
        assert_eq!(simple.format.as_deref(), Some("yaml"));
        assert!(simple.options.is_none());
    }

    #[test]
    fn request_json_omits_empty_fields() {
        let json = serde_json::to_value(ParseRequest::new("x")).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "x" }));

        let json = serde_json::to_value(
            ParseRequest::new("x").with_options(ParseOptions { max_depth: Some(3), ..Default::default() }),
        )
        .unwrap();
        assert_eq!(json["options"]["maxDepth"], 3);
        assert_eq!(json["options"]["extractMetadata"], false);
    }

    #[test]
    fn failure_carries_recovery_hint() {
        let err = ClientError::Status { status: 401, message: "no key".into() };
        let failure = ParseFailure::from_error(&err, 1);
        assert_eq!(failure.code, ErrorCode::Unauthorized);
        assert!(failure.recovery.contains("API key"));

        let json = serde_json::to_value(ParseResult::Failed(failure)).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["code"], "unauthorized");
    }
}
