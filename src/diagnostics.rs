//! The terminal logger used to report problems of the logging pipeline itself, such as failed
//! shipments to the Google Logging API.
use slog::{o, Drain, Level, Logger, OwnedKVList, Record};
use slog_async::Async;
use slog_term::{CompactFormat, TermDecorator};
use std::{fmt::Display, result::Result};

#[derive(Clone)]
struct FallbackToStderr<D: Drain> {
    drain: D,
}

impl<D: Drain> Drain for FallbackToStderr<D>
where
    D::Err: Display,
{
    type Ok = ();
    type Err = ();
    fn log(&self, record: &Record, logger_values: &OwnedKVList) -> Result<(), ()> {
        if let Err(err) = self.drain.log(record, logger_values) {
            eprint!("A drain could not log to its destination: {}", err);
        }
        Ok(())
    }

    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        self.drain.is_enabled(level)
    }
}

/// Builds an asynchronous logger that writes compact lines to stderr, dropping records below
/// `min_level`.
pub fn stderr_logger(min_level: Level) -> Logger {
    let decorator = TermDecorator::new().stderr().build();
    let term_drain = CompactFormat::new(decorator)
        .build()
        .filter_level(min_level)
        .map(|drain| FallbackToStderr { drain })
        .fuse();

    let drain = Async::new(term_drain).build().fuse();
    Logger::root(drain, o!("component" => "gcplog"))
}

/// Maps a severity name to the slog level used for diagnostics. Unknown names fail open to Info.
pub fn level_for(severity: &str) -> Level {
    match googlelog::parse_severity(severity) {
        googlelog::Severity::Debug => Level::Debug,
        googlelog::Severity::Info | googlelog::Severity::Notice => Level::Info,
        googlelog::Severity::Warning => Level::Warning,
        googlelog::Severity::Error => Level::Error,
        googlelog::Severity::Critical
        | googlelog::Severity::Alert
        | googlelog::Severity::Emergency => Level::Critical,
    }
}

#[cfg(test)]
mod tests {
    use super::{level_for, FallbackToStderr};
    use pretty_assertions::assert_eq;
    use slog::{o, Drain, Level, OwnedKVList, Record};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // Fails every record and counts the attempts
    struct Failing {
        attempts: Arc<AtomicUsize>,
    }

    impl Drain for Failing {
        type Ok = ();
        type Err = String;

        fn log(&self, _: &Record, _: &OwnedKVList) -> Result<(), String> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err("unreachable destination".to_string())
        }
    }

    #[test]
    fn fallback_swallows_drain_errors() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let drain = FallbackToStderr {
            drain: Failing {
                attempts: Arc::clone(&attempts),
            },
        };
        let log = slog::Logger::root(std::sync::Mutex::new(drain).fuse(), o!());

        slog::warn!(log, "goes nowhere");

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn severity_names_map_to_levels() {
        assert_eq!(level_for("debug"), Level::Debug);
        assert_eq!(level_for("notice"), Level::Info);
        assert_eq!(level_for("WARNING"), Level::Warning);
        assert_eq!(level_for("alert"), Level::Critical);
        assert_eq!(level_for("bogus"), Level::Info);
    }
}
