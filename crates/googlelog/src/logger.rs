use crate::entry::{Entry, Payload};
use crate::severity::Severity;

use google_logging2::api::{MonitoredResource, WriteLogEntriesRequest};

use slog::{self, Drain, Key, Never, OwnedKVList, Record, KV};
use std::collections::HashMap;
use std::fmt;
use std::fmt::Write;

use serde_json::json;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{SyncSender, TrySendError};
use std::sync::Arc;

/// A handle to one named log of a [`Client`](crate::client::Client).
///
/// Every submitted [`Entry`] becomes one [`WriteLogEntriesRequest`](https://cloud.google.com/logging/docs/reference/v2/rpc/google.logging.v2#google.logging.v2.LoggingServiceV2.WriteLogEntries)
/// on the client's channel. The logger also implements [`slog::Drain`](https://slog-rs.github.io/slog/slog/trait.Drain.html),
/// so it can be passed to a slog root logger [as usual](https://docs.rs/slog/latest/slog/#where-to-start).
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    log_name: String,
    log_level_label: Option<String>,
    default_labels: HashMap<String, String>,
    resource: MonitoredResource,
    sync_tx: SyncSender<WriteLogEntriesRequest>,
    dropped: Arc<AtomicU64>,
}

impl Logger {
    pub(crate) fn new(
        name: String,
        log_name: String,
        log_level_label: Option<String>,
        default_labels: HashMap<String, String>,
        resource: MonitoredResource,
        sync_tx: SyncSender<WriteLogEntriesRequest>,
        dropped: Arc<AtomicU64>,
    ) -> Self {
        Self {
            name,
            log_name,
            log_level_label,
            default_labels,
            resource,
            sync_tx,
            dropped,
        }
    }

    /// The log id this logger was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full `logName`, e.g. `projects/my-project/logs/my-log-id`.
    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    /// How many write requests the loggers of this client dropped because the channel was full.
    pub fn dropped_requests(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Submits an entry.
    ///
    /// This never blocks and never reports failure. If the channel is full, or its receiving end is
    /// gone, the entry is dropped.
    pub fn log(&self, entry: Entry) {
        let mut labels = self.default_labels.clone();

        // We add the severity to the labels if requested
        if let (Some(label), Some(severity)) = (&self.log_level_label, entry.severity) {
            labels.insert(label.clone(), severity.as_str().to_lowercase());
        }

        let body = WriteLogEntriesRequest {
            log_name: Some(self.log_name.clone()),
            entries: Some(vec![entry.into_log_entry(&self.resource, labels)]),
            ..Default::default()
        };

        if let Err(TrySendError::Full(_)) = self.sync_tx.try_send(body) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[derive(Debug)]
struct Serializer {
    map: HashMap<String, String>,
}

impl Serializer {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl slog::Serializer for Serializer {
    fn emit_arguments(&mut self, key: Key, val: &fmt::Arguments) -> slog::Result {
        let mut value = String::new();
        write!(value, "{val}")?;
        self.map.insert(key.into(), value);
        Ok(())
    }
}

impl Drain for Logger {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<Self::Ok, Self::Err> {
        let mut serializer = Serializer::new();

        let _ = values.serialize(record, &mut serializer);
        // Record values win over logger values with the same key
        let _ = record.kv().serialize(record, &mut serializer);

        let mut payload = serde_json::Map::new();
        payload.insert("message".to_string(), json!(format!("{}", record.msg())));

        let mut entry = Entry::new(Payload::Json(payload)).with_severity(Severity::from(record.level()));
        entry.labels = serializer.map;

        Logger::log(self, entry);

        Ok(())
    }
}
