#[cfg(feature = "shipper")]
use crate::shipper;

use crate::error::Error;
use crate::logger::Logger;

use google_logging2::api::{MonitoredResource, WriteLogEntriesRequest};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;

const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Builder for the [`Client`]
#[derive(Debug)]
pub struct Builder {
    project_id: String,
    resource_type: String,
    log_level_label: Option<String>,
    default_labels: HashMap<String, String>,
    resource_labels: Option<HashMap<String, String>>,
    channel_capacity: usize,
}

/// A Google Cloud Logging client for one project and monitored resource.
///
/// Hands out named [`Logger`]s with [`Client::logger`]. All loggers of a client share the
/// channel created by the builder, so one transport serves every log name.
#[derive(Debug, Clone)]
pub struct Client {
    project_id: String,
    log_level_label: Option<String>,
    default_labels: HashMap<String, String>,
    resource: MonitoredResource,
    sync_tx: SyncSender<WriteLogEntriesRequest>,
    dropped: Arc<AtomicU64>,
}

impl Builder {
    /// Creates a Builder object.
    ///
    /// # Parameters
    /// - `project_id`: The GCP project the logs are written to. Log names become `projects/{project_id}/logs/{name}`.
    /// - `resource_type`: The required `type` field set in the `resource` [MonitoredResource](https://cloud.google.com/logging/docs/reference/v2/rest/v2/MonitoredResource) object of the [LogEntry](https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry). For example: `k8s_container`.
    ///
    /// # Example
    ///
    /// ```
    /// use googlelog::Builder;
    /// let (client, _) = Builder::new("my-gcp-project", "k8s_container").build();
    /// let logger = client.logger("my-log-id");
    /// ```
    ///
    #[must_use = "The builder must be used"]
    pub fn new(project_id: &str, resource_type: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            resource_type: resource_type.to_string(),
            log_level_label: None,
            default_labels: HashMap::new(),
            resource_labels: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Sets resource labels to be applied.
    ///
    /// These labels will populate the `labels` field in the `resource` [MonitoredResource](https://cloud.google.com/logging/docs/reference/v2/rest/v2/MonitoredResource) object of the [LogEntry](https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry).
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// let resource_labels = json!(
    /// {
    ///     "location": "europe-west1-b",
    ///     "pod_name": std::env::var("HOSTNAME").unwrap_or_default(),
    ///     "container_name": "my-app",
    ///     "project_id": "my-gcp-project",
    ///     "cluster_name": "my-gke-cluster",
    ///     "namespace_name": "my-gke-namespace"
    /// });
    ///
    /// use googlelog::Builder;
    /// let (client, _) = Builder::new("my-gcp-project", "k8s_container")
    ///     .with_resource_labels(resource_labels)
    ///     .unwrap()
    ///     .build();
    /// ```
    ///
    /// # Errors
    ///
    /// Will return `Err` if `labels` is not a JSON object of strings.
    pub fn with_resource_labels(self, labels: serde_json::Value) -> Result<Self, Error> {
        Ok(Self {
            resource_labels: Some(
                serde_json::from_value(labels).map_err(Error::ResourceLabelsError)?,
            ),
            ..self
        })
    }

    /// Sets default labels to be applied in the labels field.
    ///
    /// These will populate the `labels` top level field of the [LogEntry](https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry). Labels set on an individual entry take precedence.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// let default_labels = json!(
    /// {
    ///     "application": "my-application",
    ///     "team": "my-team",
    ///     "environment": "production",
    /// });
    ///
    /// use googlelog::Builder;
    /// let builder = Builder::new("my-gcp-project", "global")
    ///     .with_default_labels(default_labels)
    ///     .unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Will return `Err` if `labels` is not a JSON object of strings.
    pub fn with_default_labels(self, labels: serde_json::Value) -> Result<Self, Error> {
        Ok(Self {
            default_labels: serde_json::from_value(labels).map_err(Error::DefaultLabelsError)?,
            ..self
        })
    }

    /// Sets the label name to store the log level
    ///
    /// If set, the severity name is added under this label in the `labels` top level field of the [LogEntry](https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry)
    ///
    /// If not set, the level is not propagated as a label, but you will still have the [severity](https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry#LogSeverity).
    #[must_use = "The builder must be used"]
    pub fn with_log_level_label(self, log_level_label: &str) -> Self {
        Self {
            log_level_label: Some(log_level_label.into()),
            ..self
        }
    }

    /// Sets how many write requests may be queued before [`Logger::log`] starts dropping them.
    /// Defaults to 100.
    #[must_use = "The builder must be used"]
    pub fn with_channel_capacity(self, channel_capacity: usize) -> Self {
        Self {
            channel_capacity,
            ..self
        }
    }

    fn into_client(self) -> (Client, Receiver<WriteLogEntriesRequest>) {
        let (sync_tx, sync_rx) = sync_channel::<WriteLogEntriesRequest>(self.channel_capacity);
        (
            Client {
                project_id: self.project_id,
                log_level_label: self.log_level_label,
                default_labels: self.default_labels,
                resource: MonitoredResource {
                    type_: Some(self.resource_type),
                    labels: self.resource_labels,
                },
                sync_tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            sync_rx,
        )
    }

    /// This returns a tuple with a [`Client`] and a [`std::sync::mpsc::Receiver`] channel.
    /// Every logger of the client sends the [`WriteLogEntries`](https://cloud.google.com/logging/docs/reference/v2/rpc/google.logging.v2#google.logging.v2.LoggingServiceV2.WriteLogEntries) requests it creates to this channel.
    ///
    /// For instance you could output these to the console, if you have an external agent that reads the process' output and ships it to Google Logging.
    ///
    #[must_use = "The client and receiver must be used to handle logging correctly"]
    pub fn build(self) -> (Client, Receiver<WriteLogEntriesRequest>) {
        self.into_client()
    }

    /// In an async context the [`Shipper`](shipper::Shipper) sends the log entries directly to the [Google Logging API](https://cloud.google.com/logging/docs/reference/v2/rest).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tokio::runtime::Runtime;
    ///
    /// let rt = Runtime::new().unwrap();
    /// let (client, shipper) = googlelog::Builder::new("my-gcp-project", "global")
    ///     .build_with_async_shipper();
    ///
    /// // Runs the sync-to-async bridge on its own thread and the shipper as a task
    /// shipper.spawn(rt.handle());
    ///
    /// client.logger("my-log-id").log(googlelog::Entry::new("Hello"));
    /// ```
    #[cfg(feature = "shipper")]
    #[must_use = "The client and shipper must be used to handle logging correctly"]
    pub fn build_with_async_shipper(self) -> (Client, shipper::Shipper) {
        let (client, sync_rx) = self.into_client();
        (client, shipper::Shipper::new(sync_rx))
    }
}

impl Client {
    /// The project this client writes to.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// The full resource name of the log with the given id.
    ///
    /// Slashes in the id are percent-encoded as the Logging API requires.
    pub fn log_name(&self, name: &str) -> String {
        format!(
            "projects/{}/logs/{}",
            self.project_id,
            name.replace('/', "%2F")
        )
    }

    /// How many write requests this client's loggers dropped because the channel was full.
    pub fn dropped_requests(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Returns a logger that writes to the log with the given id.
    pub fn logger(&self, name: &str) -> Logger {
        Logger::new(
            name.to_string(),
            self.log_name(name),
            self.log_level_label.clone(),
            self.default_labels.clone(),
            self.resource.clone(),
            self.sync_tx.clone(),
            Arc::clone(&self.dropped),
        )
    }
}
