//! A client for [Google Cloud Logging](https://cloud.google.com/logging) that hands out named loggers.
//!
//! # Usage
//!
//! Warning: Currently, the shipper only works in the context of [workload identity](https://cloud.google.com/iam/docs/workload-identity-federation).
//!
//! A [`Client`] is configured with the [`Builder`] for one project and monitored resource. Each call
//! to [`Client::logger`] returns a [`Logger`] for a log id; submitting an [`Entry`] to it produces a
//! [`WriteLogEntries`](https://cloud.google.com/logging/docs/reference/v2/rpc/google.logging.v2#google.logging.v2.LoggingServiceV2.WriteLogEntries)
//! request. Depending on how you want to ship these requests to the Google Logging API, choose one of the build methods:
//!
//! 1. [`build()`](Builder::build): Receives the requests over a channel and allows you to handle the transportation manually.
//! 2. [`build_with_async_shipper()`](Builder::build_with_async_shipper): Offloads transportation to the [`Shipper`](shipper::Shipper) and its sync-async Bridge in an async context. (Requires the `shipper` feature.)
//!
//! A [`Logger`] is also a [`slog::Drain`](https://slog-rs.github.io/slog/slog/trait.Drain.html).
//!
//! ```
//! use googlelog::{Builder, Entry, Severity};
//!
//! let (client, rx) = Builder::new("my-gcp-project", "global").build();
//! client
//!     .logger("my-log-id")
//!     .log(Entry::new("Hello").with_severity(Severity::Notice));
//!
//! let request = rx.recv().unwrap();
//! assert_eq!(request.log_name.as_deref(), Some("projects/my-gcp-project/logs/my-log-id"));
//! ```

/// Googlelog Error types
pub mod error;

/// Severity levels and their parser
pub mod severity;

/// Log entries and payloads
pub mod entry;

/// The client and its builder
pub mod client;

/// Named loggers, including the [`slog::Drain`](https://slog-rs.github.io/slog/slog/trait.Drain.html) implementation
pub mod logger;

/// An optional async process to ship the log for you
#[cfg(feature = "shipper")]
pub mod shipper;

pub use client::{Builder, Client};
pub use entry::{Entry, Payload};
pub use error::Error;
pub use logger::Logger;
pub use severity::{parse_severity, Severity};
