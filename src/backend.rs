//! The seam between the facade and the logging service that stores entries.
//!
//! A [`Backend`] hands out named handles and an [`EntrySink`] accepts entries on such a handle.
//! Both are implemented for the Google Cloud Logging [`Client`](googlelog::Client) and
//! [`Logger`](googlelog::Logger); [`MemoryBackend`](crate::testing::MemoryBackend) records entries
//! in memory.
use googlelog::Entry;

/// Something that accepts log entries for one named log.
pub trait EntrySink: Send + Sync {
    /// Submits an entry. Delivery failures are the sink's business and are not reported.
    fn submit(&self, entry: Entry);
}

/// A logging client that can create named loggers.
pub trait Backend {
    type Handle: EntrySink + 'static;

    /// Obtains the handle for the log with the given name.
    fn logger(&self, name: &str) -> Self::Handle;
}

impl EntrySink for googlelog::Logger {
    fn submit(&self, entry: Entry) {
        self.log(entry)
    }
}

impl Backend for googlelog::Client {
    type Handle = googlelog::Logger;

    fn logger(&self, name: &str) -> Self::Handle {
        googlelog::Client::logger(self, name)
    }
}
