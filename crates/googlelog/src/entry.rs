use crate::severity::Severity;

use chrono::{DateTime, Utc};
use google_logging2::api::{LogEntry, MonitoredResource};
use std::collections::HashMap;

/// The payload of an [`Entry`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sent as the `textPayload` field.
    Text(String),
    /// Sent as the `jsonPayload` field.
    Json(serde_json::Map<String, serde_json::Value>),
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Payload {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Payload::Json(map)
    }
}

/// A single log entry: a payload, a severity and optional metadata.
///
/// Without a severity the entry is sent with Google's `DEFAULT` severity. A missing timestamp is
/// filled in by the [`Logger`](crate::logger::Logger) when the entry is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub payload: Payload,
    pub severity: Option<Severity>,
    pub timestamp: Option<DateTime<Utc>>,
    pub labels: HashMap<String, String>,
    pub insert_id: Option<String>,
    pub trace: Option<String>,
    pub span_id: Option<String>,
    pub trace_sampled: Option<bool>,
}

impl Entry {
    /// Creates an entry without severity or metadata.
    pub fn new(payload: impl Into<Payload>) -> Self {
        Self {
            payload: payload.into(),
            severity: None,
            timestamp: None,
            labels: HashMap::new(),
            insert_id: None,
            trace: None,
            span_id: None,
            trace_sampled: None,
        }
    }

    #[must_use]
    pub fn with_severity(self, severity: Severity) -> Self {
        Self {
            severity: Some(severity),
            ..self
        }
    }

    #[must_use]
    pub fn with_timestamp(self, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..self
        }
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_insert_id(self, insert_id: impl Into<String>) -> Self {
        Self {
            insert_id: Some(insert_id.into()),
            ..self
        }
    }

    /// Links the entry to a Cloud Trace trace, e.g. `projects/my-project/traces/06796866738c859f2f19b7cfb3214824`.
    #[must_use]
    pub fn with_trace(self, trace: impl Into<String>, span_id: Option<String>, sampled: bool) -> Self {
        Self {
            trace: Some(trace.into()),
            span_id,
            trace_sampled: Some(sampled),
            ..self
        }
    }

    /// The payload as text, if it is a text payload.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text.as_str()),
            Payload::Json(_) => None,
        }
    }

    // Builds the Google API representation. Labels given here are overridden by the entry's own.
    pub(crate) fn into_log_entry(
        self,
        resource: &MonitoredResource,
        mut labels: HashMap<String, String>,
    ) -> LogEntry {
        labels.extend(self.labels);

        let (text_payload, json_payload) = match self.payload {
            Payload::Text(text) => (Some(text), None),
            Payload::Json(map) => (None, Some(map.into_iter().collect())),
        };

        LogEntry {
            text_payload,
            json_payload,
            labels: if labels.is_empty() { None } else { Some(labels) },
            severity: self.severity.map(|s| s.as_str().to_string()),
            timestamp: Some(self.timestamp.unwrap_or_else(Utc::now)),
            resource: Some(resource.clone()),
            insert_id: self.insert_id,
            trace: self.trace,
            span_id: self.span_id,
            trace_sampled: self.trace_sampled,
            ..Default::default()
        }
    }
}
