use googlelog::{Entry, Severity};
use std::fmt::{self, Display, Write};

/// The leveled logging operations.
///
/// Implementors provide [`log`](Logger::log) and the minimum severity accessors; every leveled
/// method funnels through [`log_at`](Logger::log_at). The leveled methods take their arguments as a
/// slice of [`Display`] values which are concatenated without separator, the `*f` variants take
/// [`format_args!`] output. The [`info!`](crate::info!) family of macros builds both forms.
///
/// ```
/// use gcplog::testing::MemoryBackend;
/// use gcplog::{Facade, Logger, Severity};
///
/// let backend = MemoryBackend::new();
/// let logger = Facade::new(&backend, "svc-a");
/// logger.warning(&[&"disk at ", &93, &"%"]);
/// logger.infof(format_args!("user {} logged in", "alice"));
///
/// let entries = backend.entries();
/// assert_eq!(entries[0].entry.text(), Some("disk at 93%"));
/// assert_eq!(entries[1].entry.severity, Some(Severity::Info));
/// ```
pub trait Logger: Send + Sync {
    /// Submits an entry as-is, keeping whatever severity it carries.
    fn log(&self, entry: Entry);

    /// Sets the minimum severity from its name. Unknown names fail open to [`Severity::Info`].
    fn set_severity(&self, severity: &str);

    /// The current minimum severity.
    fn severity(&self) -> Severity;

    /// Concatenates `args` into a text payload and submits it with the given severity.
    fn log_at(&self, severity: Severity, args: &[&dyn Display]) {
        self.log(Entry::new(concat(args)).with_severity(severity))
    }

    /// Logs the concatenated `args` at [`Severity::Debug`].
    fn debug(&self, args: &[&dyn Display]) {
        self.log_at(Severity::Debug, args)
    }

    /// Logs the formatted `args` at [`Severity::Debug`].
    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.debug(&[&args])
    }

    /// Logs the concatenated `args` at [`Severity::Info`].
    fn info(&self, args: &[&dyn Display]) {
        self.log_at(Severity::Info, args)
    }

    /// Logs the formatted `args` at [`Severity::Info`].
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.info(&[&args])
    }

    /// Logs the concatenated `args` at [`Severity::Notice`].
    fn notice(&self, args: &[&dyn Display]) {
        self.log_at(Severity::Notice, args)
    }

    /// Logs the formatted `args` at [`Severity::Notice`].
    fn noticef(&self, args: fmt::Arguments<'_>) {
        self.notice(&[&args])
    }

    /// Logs the concatenated `args` at [`Severity::Warning`].
    fn warning(&self, args: &[&dyn Display]) {
        self.log_at(Severity::Warning, args)
    }

    /// Logs the formatted `args` at [`Severity::Warning`].
    fn warningf(&self, args: fmt::Arguments<'_>) {
        self.warning(&[&args])
    }

    /// Logs the concatenated `args` at [`Severity::Error`].
    fn error(&self, args: &[&dyn Display]) {
        self.log_at(Severity::Error, args)
    }

    /// Logs the formatted `args` at [`Severity::Error`].
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.error(&[&args])
    }

    /// Logs the concatenated `args` at [`Severity::Critical`].
    fn critical(&self, args: &[&dyn Display]) {
        self.log_at(Severity::Critical, args)
    }

    /// Logs the formatted `args` at [`Severity::Critical`].
    fn criticalf(&self, args: fmt::Arguments<'_>) {
        self.critical(&[&args])
    }

    /// Logs the concatenated `args` at [`Severity::Alert`].
    fn alert(&self, args: &[&dyn Display]) {
        self.log_at(Severity::Alert, args)
    }

    /// Logs the formatted `args` at [`Severity::Alert`].
    fn alertf(&self, args: fmt::Arguments<'_>) {
        self.alert(&[&args])
    }

    /// Logs the concatenated `args` at [`Severity::Emergency`].
    fn emergency(&self, args: &[&dyn Display]) {
        self.log_at(Severity::Emergency, args)
    }

    /// Logs the formatted `args` at [`Severity::Emergency`].
    fn emergencyf(&self, args: fmt::Arguments<'_>) {
        self.emergency(&[&args])
    }
}

/// Joins the display form of all arguments, no separator.
pub(crate) fn concat(args: &[&dyn Display]) -> String {
    let mut payload = String::new();
    for arg in args {
        // Writing to a String cannot fail
        let _ = write!(payload, "{arg}");
    }
    payload
}
