//! Remote sink: fire-and-forget JSON delivery over HTTP
//!
//! Every write serializes `{"time", "level", "message"}` and hands the request
//! to a detached task on the sink's own runtime. `write` never waits for the
//! network, and delivery failures are dropped inside the task.

use super::{Sink, SinkKind};
use crate::core::formatter::JsonRecord;
use crate::core::{Formatter, LogEntry, LoggerError, RemoteConfig, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

/// Request timeout of the built-in client
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully built delivery request
#[derive(Debug, Clone)]
pub struct RemoteRequest {
    pub method: Method,
    pub endpoint: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Seam for replacing the HTTP client
///
/// # Example
///
/// ```
/// use fanlog::sinks::{RemoteRequest, Transport};
/// use fanlog::Result;
/// use async_trait::async_trait;
///
/// struct Discard;
///
/// #[async_trait]
/// impl Transport for Discard {
///     async fn send(&self, _request: RemoteRequest) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RemoteRequest) -> Result<()>;
}

/// Default transport backed by a `reqwest` client
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RemoteRequest) -> Result<()> {
        self.client
            .request(request.method, request.endpoint.as_str())
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

pub struct RemoteSink {
    endpoint: String,
    method: Method,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
    formatter: Option<Formatter>,
    runtime: Option<Runtime>,
}

impl RemoteSink {
    /// Validate the configuration and start the delivery runtime
    ///
    /// The JSON `message` field is the rendered template unless `formatter`
    /// is given, in which case its output (without the trailing line break)
    /// is used instead.
    pub fn new(config: &RemoteConfig, formatter: Option<Formatter>) -> Result<Self> {
        if config.endpoint.is_empty() {
            return Err(LoggerError::EndpointRequired);
        }

        let method = match config.method.as_deref() {
            None | Some("") => Method::POST,
            Some(m) => Method::from_bytes(m.to_uppercase().as_bytes())
                .map_err(|_| LoggerError::config("remote.method", format!("invalid HTTP method '{}'", m)))?,
        };

        let headers = build_headers(config)?;

        let transport: Arc<dyn Transport> = match config.transport {
            Some(ref transport) => Arc::clone(transport),
            None => Arc::new(ReqwestTransport::new()?),
        };

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("fanlog-remote")
            .enable_all()
            .build()
            .map_err(|e| LoggerError::io_operation("starting remote runtime", config.endpoint.clone(), e))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            method,
            headers,
            transport,
            formatter,
            runtime: Some(runtime),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the request for an entry without sending it
    pub fn build_request(&self, entry: &LogEntry) -> Result<RemoteRequest> {
        let message = match self.formatter {
            Some(ref formatter) => formatter
                .format_entry(entry)
                .trim_end_matches(|c: char| c == '\n' || c == '\r')
                .to_string(),
            None => entry.message(),
        };

        let record = JsonRecord {
            time: &entry.timestamp,
            level: entry.level.to_str(),
            message,
        };

        Ok(RemoteRequest {
            method: self.method.clone(),
            endpoint: self.endpoint.clone(),
            headers: self.headers.clone(),
            body: serde_json::to_vec(&record)?,
        })
    }
}

impl Sink for RemoteSink {
    fn write(&mut self, entry: &LogEntry) -> Result<usize> {
        let request = self.build_request(entry)?;
        let len = request.body.len();

        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| LoggerError::writer("Remote runtime not running"))?;
        let transport = Arc::clone(&self.transport);
        runtime.spawn(async move {
            let _ = transport.send(request).await;
        });

        Ok(len)
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Remote
    }
}

impl Drop for RemoteSink {
    fn drop(&mut self) {
        // In-flight deliveries are abandoned, not awaited.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

fn build_headers(config: &RemoteConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| LoggerError::config("remote.headers", format!("invalid header name '{}'", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| LoggerError::config("remote.headers", format!("invalid value for header '{}'", name)))?;
        headers.insert(name, value);
    }

    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    Ok(headers)
}
