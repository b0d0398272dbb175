use crate::backend::{Backend, EntrySink};
use crate::logger::Logger;

use googlelog::{parse_severity, Entry, Severity};
use std::fmt;
use std::sync::atomic::{AtomicU16, Ordering};

/// A [`Logger`] bound to one named log of a [`Backend`].
///
/// The facade keeps a minimum severity, initially [`Severity::Info`]. Unless filtering is switched
/// on with [`with_severity_filter`](Facade::with_severity_filter) it is only recorded: every entry
/// reaches the backend regardless of its severity.
pub struct Facade {
    name: String,
    sink: Box<dyn EntrySink>,
    severity: AtomicU16,
    filter: bool,
}

impl Facade {
    /// Creates a facade for the log `name` of the given backend.
    pub fn new<B: Backend + ?Sized>(backend: &B, name: &str) -> Self {
        Self::from_sink(name, backend.logger(name))
    }

    /// Creates a facade around an already obtained backend handle.
    pub fn from_sink(name: &str, sink: impl EntrySink + 'static) -> Self {
        Self {
            name: name.to_string(),
            sink: Box::new(sink),
            severity: AtomicU16::new(Severity::Info.code()),
            filter: false,
        }
    }

    /// Drops entries below the minimum severity when `enabled`.
    ///
    /// Entries without a severity are never dropped.
    #[must_use]
    pub fn with_severity_filter(self, enabled: bool) -> Self {
        Self {
            filter: enabled,
            ..self
        }
    }

    /// The name this facade's backend logger was obtained with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether entries below the minimum severity are dropped.
    pub fn filters_by_severity(&self) -> bool {
        self.filter
    }

    fn passes(&self, entry: &Entry) -> bool {
        if !self.filters_by_severity() {
            return true;
        }
        match entry.severity {
            Some(severity) => severity >= self.severity(),
            None => true,
        }
    }
}

impl Logger for Facade {
    fn log(&self, entry: Entry) {
        if self.passes(&entry) {
            self.sink.submit(entry);
        }
    }

    fn set_severity(&self, severity: &str) {
        self.severity
            .store(parse_severity(severity).code(), Ordering::Relaxed);
    }

    fn severity(&self) -> Severity {
        Severity::from_repr(self.severity.load(Ordering::Relaxed)).unwrap_or_default()
    }
}

impl fmt::Debug for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facade")
            .field("name", &self.name)
            .field("severity", &self.severity())
            .field("filter", &self.filters_by_severity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::Facade;
    use crate::logger::Logger;
    use crate::testing::MemoryBackend;
    use googlelog::{Entry, Severity};
    use pretty_assertions::assert_eq;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn infof_submits_one_formatted_info_entry() {
        let backend = MemoryBackend::new();
        Facade::new(&backend, "svc-a").infof(format_args!("user {} logged in", "alice"));

        let entries = backend.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].logger, "svc-a");
        assert_eq!(entries[0].entry.severity, Some(Severity::Info));
        assert_eq!(entries[0].entry.text(), Some("user alice logged in"));
    }

    #[test]
    fn leveled_methods_concatenate_arguments() {
        let backend = MemoryBackend::new();
        let facade = Facade::new(&backend, "svc");
        facade.critical(&[&"retries=", &3, &" last=", &"timeout"]);

        let entries = backend.entries();
        assert_eq!(entries[0].entry.text(), Some("retries=3 last=timeout"));
        assert_eq!(entries[0].entry.severity, Some(Severity::Critical));
    }

    #[test]
    fn log_keeps_the_entry_unchanged() {
        let backend = MemoryBackend::new();
        let facade = Facade::new(&backend, "svc");
        let entry = Entry::new("raw")
            .with_severity(Severity::Alert)
            .with_label("k", "v");
        facade.log(entry.clone());
        facade.log(Entry::new("no severity"));

        let entries = backend.entries();
        assert_eq!(entries[0].entry, entry);
        assert_eq!(entries[1].entry.severity, None);
    }

    #[test]
    fn new_facades_start_at_info() {
        let backend = MemoryBackend::new();
        let facade = Facade::new(&backend, "svc");
        assert_eq!(facade.severity(), Severity::Info);
        assert_eq!(facade.name(), "svc");
        assert!(!facade.filters_by_severity());
    }

    #[test]
    fn set_severity_parses_and_fails_open() {
        let backend = MemoryBackend::new();
        let facade = Facade::new(&backend, "svc");

        facade.set_severity("warning");
        assert_eq!(facade.severity(), Severity::Warning);

        facade.set_severity("not-a-real-level");
        assert_eq!(facade.severity(), Severity::Info);

        facade.set_severity("EMERGENCY");
        assert_eq!(facade.severity(), Severity::Emergency);
    }

    #[test]
    fn minimum_severity_does_not_filter_by_default() {
        let backend = MemoryBackend::new();
        let facade = Facade::new(&backend, "svc");
        facade.set_severity("error");

        facade.debug(&[&"still sent"]);
        facade.info(&[&"also sent"]);

        assert_eq!(backend.entries().len(), 2);
    }

    #[test]
    fn severity_filter_drops_entries_below_the_minimum() {
        let backend = MemoryBackend::new();
        let facade = Facade::new(&backend, "svc").with_severity_filter(true);
        facade.set_severity("warning");

        facade.info(&[&"dropped"]);
        facade.warning(&[&"kept"]);
        facade.emergency(&[&"kept too"]);
        facade.log(Entry::new("no severity is kept"));

        let payloads: Vec<_> = backend
            .entries()
            .into_iter()
            .filter_map(|r| r.entry.text().map(str::to_string))
            .collect();
        assert_eq!(payloads, vec!["kept", "kept too", "no severity is kept"]);
    }

    #[test]
    fn independent_facades_share_nothing_but_the_backend() {
        let backend = MemoryBackend::new();
        let a = Facade::new(&backend, "a");
        let b = Facade::new(&backend, "b");
        a.set_severity("alert");

        assert_eq!(b.severity(), Severity::Info);
        b.notice(&[&"from b"]);
        a.notice(&[&"from a"]);

        let loggers: Vec<_> = backend.entries().into_iter().map(|r| r.logger).collect();
        assert_eq!(loggers, vec!["b", "a"]);
        assert_eq!(backend.loggers_created(), 2);
    }

    #[test]
    fn stalled_delivery_never_blocks_leveled_calls() {
        let (client, _undelivered) = googlelog::Builder::new("p", "global")
            .with_channel_capacity(4)
            .build();
        let facade = Facade::new(&client, "svc");

        let (done_tx, done_rx) = mpsc::channel();
        std::thread::spawn(move || {
            for i in 0..300 {
                facade.info(&[&"entry ", &i]);
            }
            let _ = done_tx.send(());
        });

        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
        assert_eq!(client.dropped_requests(), 296);
    }
}
