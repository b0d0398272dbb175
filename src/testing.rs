//! An in-memory [`Backend`] for tests.
use crate::backend::{Backend, EntrySink};

use googlelog::Entry;
use std::sync::{Arc, Mutex, MutexGuard};

/// An entry together with the name of the logger it was submitted to.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub logger: String,
    pub entry: Entry,
}

#[derive(Debug, Default)]
struct Record {
    loggers: Vec<String>,
    entries: Vec<Recorded>,
}

/// A [`Backend`] that keeps every submitted entry in memory.
///
/// Clones share the same record, so a clone can be handed to code under test while the original
/// is used for assertions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    record: Arc<Mutex<Record>>,
}

/// The handle returned by [`MemoryBackend`].
#[derive(Debug, Clone)]
pub struct MemoryLogger {
    name: String,
    record: Arc<Mutex<Record>>,
}

fn lock(record: &Mutex<Record>) -> MutexGuard<'_, Record> {
    // A panicking test thread must not hide what was recorded before it
    record.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything submitted so far, oldest first.
    pub fn entries(&self) -> Vec<Recorded> {
        lock(&self.record).entries.clone()
    }

    /// How many named loggers were obtained from this backend.
    pub fn loggers_created(&self) -> usize {
        lock(&self.record).loggers.len()
    }

    /// The names of the loggers obtained from this backend, in order.
    pub fn logger_names(&self) -> Vec<String> {
        lock(&self.record).loggers.clone()
    }
}

impl Backend for MemoryBackend {
    type Handle = MemoryLogger;

    fn logger(&self, name: &str) -> Self::Handle {
        lock(&self.record).loggers.push(name.to_string());
        MemoryLogger {
            name: name.to_string(),
            record: Arc::clone(&self.record),
        }
    }
}

impl EntrySink for MemoryLogger {
    fn submit(&self, entry: Entry) {
        lock(&self.record).entries.push(Recorded {
            logger: self.name.clone(),
            entry,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryBackend;
    use crate::backend::{Backend, EntrySink};
    use googlelog::Entry;
    use pretty_assertions::assert_eq;

    #[test]
    fn clones_share_the_record() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();
        clone.logger("n1").submit(Entry::new("hello"));

        assert_eq!(backend.loggers_created(), 1);
        assert_eq!(backend.logger_names(), vec!["n1".to_string()]);
        assert_eq!(backend.entries()[0].logger, "n1");
        assert_eq!(backend.entries()[0].entry.text(), Some("hello"));
    }
}
