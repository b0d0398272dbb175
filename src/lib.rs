//! A leveled logging facade for [Google Cloud Logging](https://cloud.google.com/logging).
//!
//! Each leveled call, from [`debug`] to [`emergency`], turns its arguments into one text payload,
//! tags it with the matching [`Severity`] and hands the resulting [`Entry`] to a backend logger.
//! Errors in delivery are the backend's business and never reach the caller.
//!
//! There are two ways to log:
//!
//! - Through a [`Facade`] created with [`Facade::new`] for a named log of a [`Backend`]. Any
//!   number of them can exist side by side.
//! - Through the free functions and macros of this crate, which use the process-wide default facade
//!   set up once with [`init`] (or [`init_from_env`]).
//!
//! ```
//! use gcplog::{info, infof, Severity};
//!
//! let (client, requests) = googlelog::Builder::new("my-gcp-project", "global").build();
//! gcplog::init(&client, "svc-a");
//!
//! info!("cache warm after ", 12, "ms");
//! infof!("user {} logged in", "alice");
//! gcplog::set_severity("warning");
//! assert_eq!(gcplog::severity(), Severity::Warning);
//!
//! let entry = requests.recv().unwrap().entries.unwrap().remove(0);
//! assert_eq!(entry.text_payload.as_deref(), Some("cache warm after 12ms"));
//! assert_eq!(entry.severity.as_deref(), Some("INFO"));
//! ```

pub mod backend;
pub mod config;
pub mod diagnostics;
mod error;
mod facade;
pub mod global;
mod logger;
mod macros;
pub mod testing;

pub use backend::{Backend, EntrySink};
pub use config::{init_from_env, Config};
pub use error::Error;
pub use facade::Facade;
pub use global::{
    alert, alertf, critical, criticalf, debug, debugf, default_facade, emergency, emergencyf,
    error, errorf, info, infof, init, init_with, log, notice, noticef, set_severity, severity,
    warning, warningf,
};
pub use googlelog::{parse_severity, Entry, Payload, Severity};
pub use logger::Logger;
