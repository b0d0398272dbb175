use slog::Level;
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

/// The severity of a log entry, ordered by increasing urgency.
///
/// The discriminants are the numeric values of Google's
/// [LogSeverity](https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry#logseverity).
/// The string form is the upper-case name Google expects in the `severity` field of a `LogEntry`.
///
/// [`FromStr`](std::str::FromStr) is strict and case-insensitive. Use [`parse_severity`] when an
/// unknown name should fall back to [`Severity::Info`] instead.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    FromRepr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[repr(u16)]
pub enum Severity {
    Debug = 100,
    #[default]
    Info = 200,
    Notice = 300,
    Warning = 400,
    Error = 500,
    Critical = 600,
    Alert = 700,
    Emergency = 800,
}

impl Severity {
    /// All severities from least to most urgent.
    pub const ALL: [Severity; 8] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::Alert,
        Severity::Emergency,
    ];

    /// The name sent to the Google Logging API, e.g. `WARNING`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Google's numeric LogSeverity code.
    pub fn code(self) -> u16 {
        self as u16
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Critical => Severity::Critical,
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
            Level::Info => Severity::Info,
            Level::Debug | Level::Trace => Severity::Debug,
        }
    }
}

/// Parses a severity name, ignoring case and surrounding whitespace.
///
/// Unknown names fail open to [`Severity::Info`].
pub fn parse_severity(name: &str) -> Severity {
    name.trim().parse().unwrap_or_default()
}
