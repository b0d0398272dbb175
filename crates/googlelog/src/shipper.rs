use std::sync::mpsc as sync_mpsc;
use std::time::Duration;
use tokio::sync::mpsc as async_mpsc;

use google_logging2::api::WriteLogEntriesRequest;

use chrono::{DateTime, TimeDelta, Utc};

use reqwest::{Client, Response};

use slog::{o, Discard};

use crate::error::Error;

const DEFAULT_API_ENDPOINT: &str = "https://logging.googleapis.com/v2/entries:write";

const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Falls back to reqwest's default client if the configured one cannot be built
fn http_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_default()
}

/// Token caching
#[derive(Default)]
pub struct Token {
    token: Option<String>,
    renew_after: DateTime<Utc>,
}

async fn get_error_response(response: Response, context: String) -> Error {
    let status = response.status();

    let body = match response.bytes().await {
        Ok(bytes) => match serde_json::from_slice::<String>(&bytes) {
            Ok(json) => json,
            Err(_) => String::from_utf8_lossy(&bytes).to_string(),
        },
        Err(e) => format!("could not decode body of HTTP Error response: {e}"),
    };

    Error::HttpResponseError {
        context,
        status,
        body,
    }
}

impl Token {
    // Renew a minute before the token actually expires
    fn renew_after_from_expires_in(expires_in: u64) -> DateTime<Utc> {
        let renew_after = TimeDelta::seconds(expires_in.saturating_sub(60) as i64);
        Utc::now() + renew_after
    }

    // Extracts the token and its lifetime from a metadata server response body
    fn parse_token_response(body: &str) -> Result<(String, u64), Error> {
        let token_data: serde_json::Value =
            serde_json::from_str(body).map_err(|e| Error::ShipperSerializeError {
                context: "deserializing token data".to_string(),
                source: e,
            })?;
        let token = token_data["access_token"]
            .as_str()
            .ok_or(Error::ShipperTokenNotFound)?
            .to_string();
        let expires_in = token_data["expires_in"]
            .as_u64()
            .ok_or(Error::ShipperTokenExpiryNotFound)?;
        Ok((token, expires_in))
    }

    async fn fetch_access_token(&mut self, client: &Client, metadata_host: &str) -> Result<String, Error> {
        if let Some(token) = &self.token {
            if Utc::now() < self.renew_after {
                return Ok(token.clone());
            }
        }

        let response = client
            .get(format!(
                "http://{metadata_host}/computeMetadata/v1/instance/service-accounts/default/token"
            ))
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| Error::ShipperReqwestError {
                context: "performing HTTP GET token credentials from metadata server".to_string(),
                source: e,
            })?;

        if response.status().is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| Error::ShipperReqwestError {
                    context: "consuming response body of access token request".to_string(),
                    source: e,
                })?;
            let (token_str, expires_in) = Self::parse_token_response(&body)?;
            self.token = Some(token_str.clone());
            self.renew_after = Self::renew_after_from_expires_in(expires_in);
            Ok(token_str)
        } else {
            Err(get_error_response(response, "fetching token".to_string()).await)
        }
    }
}

/// A sync to async channel bridge.
/// Forwards the write requests from the [loggers](crate::logger::Logger) to the [`Shipper`]
pub struct Bridge {
    sync_rx: sync_mpsc::Receiver<WriteLogEntriesRequest>,
    async_tx: async_mpsc::Sender<WriteLogEntriesRequest>,
    log: slog::Logger,
}

impl Bridge {
    /// Forwards write requests from the loggers to the shipper, in order, until every logger is gone.
    ///
    /// This blocks the current thread. It must not run on a runtime worker thread.
    pub fn run_sync_to_async_bridge(self) {
        while let Ok(message) = self.sync_rx.recv() {
            if let Err(e) = self.async_tx.blocking_send(message) {
                slog::error!(
                    self.log,
                    "Failed to forward log message to async channel, log message not sent to Google Logger: {}",
                    e
                );
                return;
            }
        }
    }
}

/// Sends the log messages to the Google Logging API
pub struct Shipper {
    client: Client,
    token: Token,
    api_endpoint: String,
    metadata_host: String,
    log: slog::Logger,
    sync_rx: Option<sync_mpsc::Receiver<WriteLogEntriesRequest>>,
    async_rx: async_mpsc::Receiver<WriteLogEntriesRequest>,
    async_tx: Option<async_mpsc::Sender<WriteLogEntriesRequest>>,
}

impl Shipper {
    /// Creates a `Shipper`
    pub fn new(sync_rx: sync_mpsc::Receiver<WriteLogEntriesRequest>) -> Self {
        let (async_tx, async_rx) = tokio::sync::mpsc::channel::<WriteLogEntriesRequest>(100);

        Shipper {
            client: http_client(DEFAULT_REQUEST_TIMEOUT),
            token: Token::default(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            metadata_host: DEFAULT_METADATA_HOST.to_string(),
            log: slog::Logger::root(Discard, o!()),
            sync_rx: Some(sync_rx),
            async_rx,
            async_tx: Some(async_tx),
        }
    }

    /// Sets the logger that shipping failures are reported to. By default they are discarded.
    #[must_use]
    pub fn with_diagnostics(self, log: slog::Logger) -> Self {
        Self { log, ..self }
    }

    /// Overrides the `entries:write` URL, e.g. to point at a local emulator.
    #[must_use]
    pub fn with_api_endpoint(self, api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            ..self
        }
    }

    /// Sets the timeout of every request to the metadata server and the Logging API. Defaults to
    /// 30 seconds.
    #[must_use]
    pub fn with_request_timeout(self, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            ..self
        }
    }

    /// Overrides the host of the GCE metadata server used to obtain access tokens.
    #[must_use]
    pub fn with_metadata_host(self, metadata_host: impl Into<String>) -> Self {
        Self {
            metadata_host: metadata_host.into(),
            ..self
        }
    }

    /// Takes the sync receiver and async sender from the Shipper struct into the [`Bridge`]
    ///
    /// Returns `None` if the bridge was already taken.
    pub fn yield_bridge(&mut self) -> Option<Bridge> {
        match (self.sync_rx.take(), self.async_tx.take()) {
            (Some(sync_rx), Some(async_tx)) => Some(Bridge {
                sync_rx,
                async_tx,
                log: self.log.clone(),
            }),
            _ => None,
        }
    }

    /// Runs the bridge on its own thread and the shipper as a task of the given runtime.
    ///
    /// The bridge thread is detached: loggers may outlive the runtime, and runtime shutdown must
    /// not wait for them.
    pub fn spawn(mut self, handle: &tokio::runtime::Handle) {
        if let Some(bridge) = self.yield_bridge() {
            let spawned = std::thread::Builder::new()
                .name("googlelog-bridge".to_string())
                .spawn(move || bridge.run_sync_to_async_bridge());
            if let Err(e) = spawned {
                slog::error!(self.log, "Could not start the log bridge thread, logs will not be shipped: {}", e);
                return;
            }
        }
        handle.spawn(self.run_log_shipper());
    }

    async fn send_log_entry(
        &mut self,
        token: &str,
        body: WriteLogEntriesRequest,
    ) -> Result<(), Error> {
        let response = self
            .client
            .post(&self.api_endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ShipperReqwestError {
                context: "performing HTTP POST request to the Google Logging API".to_string(),
                source: e,
            })?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(get_error_response(
                response,
                "response when sending log entry to Google Logging API".to_string(),
            )
            .await)
        }
    }

    /// The process that receives log entries and sends them to the Google Logging API
    pub async fn run_log_shipper(mut self) {
        while let Some(log_entry) = self.async_rx.recv().await {
            let token = self
                .token
                .fetch_access_token(&self.client, &self.metadata_host)
                .await;
            match token {
                Ok(token) => {
                    if let Err(e) = self.send_log_entry(&token, log_entry).await {
                        slog::error!(self.log, "Failed to send log entry: {}", e);
                    }
                }
                Err(e) => {
                    slog::error!(self.log, "Failed to fetch access token: {}", e);
                }
            }
        }
    }
}
