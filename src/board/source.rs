use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::RawRecord;

/// Feed the board loads from when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://mocki.io/v1/282222c9-43cf-4d92-9ba0-0e0d1447f403";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("invalid response format")]
    Shape,
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Transport failures never reached a parseable body.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status(_))
    }
}

/// Where raw records come from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError>;
}

/// One GET against a fixed JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        debug!(endpoint = %self.endpoint, "fetching records");
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        parse_envelope(&body)
    }
}

/// `{ "response": <truthy>, "data": [RawRecord] }`
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    response: Option<Value>,
    #[serde(default)]
    data: Option<Vec<RawRecord>>,
}

/// Decode a response body and check its structural marker.
///
/// A falsy or absent `response` and a missing `data` array are both shape
/// errors.
pub fn parse_envelope(body: &[u8]) -> Result<Vec<RawRecord>, FetchError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    if !envelope.response.as_ref().is_some_and(is_truthy) {
        return Err(FetchError::Shape);
    }
    envelope.data.ok_or(FetchError::Shape)
}

/// JSON truthiness: `false`, `null`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
