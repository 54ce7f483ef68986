use reqwest::{RequestBuilder, Response};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::{HealthStatus, ParseFailure, ParseRequest, ParseResult, ParseSuccess};

const PARSE_PATH: &str = "/v1/parse";
const HEALTH_PATH: &str = "/health";

/// Client for the hosted parsing service.
///
/// `parse` never fails outright: every problem comes back as
/// `ParseResult::Failed` with a code and a recovery hint.
#[derive(Debug, Clone)]
pub struct ParseClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ParseClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base url is empty".to_string()));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.config.api_key = Some(key.into());
    }

    pub fn clear_api_key(&mut self) {
        self.config.api_key = None;
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Parse a document. Transient failures are retried once with the
    /// request's options stripped.
    pub async fn parse(&self, request: &ParseRequest) -> ParseResult {
        if request.content.trim().is_empty() {
            let err = ClientError::InvalidInput("content is empty".to_string());
            return ParseResult::Failed(ParseFailure::from_error(&err, 0));
        }

        let first = match self.send_parse(request).await {
            Ok(data) => {
                return ParseResult::Parsed(ParseSuccess { data, attempts: 1, simplified: false });
            }
            Err(err) => err,
        };

        let code = first.code();
        if !self.config.retry_simplified || !code.is_retryable() {
            log::warn!("parse failed ({:?}): {}", code, first);
            return ParseResult::Failed(ParseFailure::from_error(&first, 1));
        }

        log::warn!(
            "parse failed ({:?}): {}; retrying simplified in {:?}",
            code,
            first,
            self.config.retry_delay
        );
        tokio::time::sleep(self.config.retry_delay).await;

        match self.send_parse(&request.simplified()).await {
            Ok(data) => ParseResult::Parsed(ParseSuccess { data, attempts: 2, simplified: true }),
            Err(err) => {
                log::warn!("simplified retry failed ({:?}): {}", err.code(), err);
                ParseResult::Failed(ParseFailure::from_error(&err, 2))
            }
        }
    }

    async fn send_parse(&self, request: &ParseRequest) -> Result<serde_json::Value, ClientError> {
        let builder = self.http.post(self.url(PARSE_PATH)).json(request);
        let response = self.authorize(builder).send().await?;
        let body = read_success(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn health_check(&self) -> Result<HealthStatus, ClientError> {
        let builder = self.http.get(self.url(HEALTH_PATH));
        let response = self.authorize(builder).send().await?;
        let body = read_success(response).await?;
        let health: HealthStatus = serde_json::from_str(&body)?;
        if !health.is_healthy() {
            log::warn!("parse service reports status '{}'", health.status);
        }
        Ok(health)
    }
}

/// Body text of a 2xx response; anything else becomes `ClientError::Status`.
async fn read_success(response: Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }
    Err(ClientError::Status {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason()),
    })
}

/// Pull `error` or `message` out of a JSON error body, else use the raw text.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("no response body").to_string()
    } else {
        trimmed.to_string()
    }
}
