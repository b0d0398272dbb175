//! Variadic logging macros.
//!
//! `info!(a, b, c)` logs the concatenation of its arguments through the default facade, and
//! `info!(logger; a, b, c)` through any [`Logger`](crate::Logger). The `*f` macros take a format
//! string: `infof!("user {} logged in", name)` or `infof!(logger; "user {} logged in", name)`.
//!
//! ```
//! use gcplog::testing::MemoryBackend;
//! use gcplog::{info, warningf, Facade, Severity};
//!
//! let backend = MemoryBackend::new();
//! let logger = Facade::new(&backend, "svc-a");
//! info!(logger; "cache ", "warm after ", 12, "ms");
//! warningf!(logger; "{} of {} replicas down", 1, 3);
//!
//! let entries = backend.entries();
//! assert_eq!(entries[0].entry.text(), Some("cache warm after 12ms"));
//! assert_eq!(entries[1].entry.severity, Some(Severity::Warning));
//! ```

#[macro_export]
macro_rules! debug {
    ($logger:expr; $($arg:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.debug(&[$(&$arg as &dyn ::std::fmt::Display),+])
    }};
    ($($arg:expr),+ $(,)?) => {
        $crate::global::debug(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

#[macro_export]
macro_rules! debugf {
    ($logger:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.debugf(::std::format_args!($($arg)+))
    }};
    ($($arg:tt)+) => {
        $crate::global::debugf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr; $($arg:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.info(&[$(&$arg as &dyn ::std::fmt::Display),+])
    }};
    ($($arg:expr),+ $(,)?) => {
        $crate::global::info(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

#[macro_export]
macro_rules! infof {
    ($logger:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.infof(::std::format_args!($($arg)+))
    }};
    ($($arg:tt)+) => {
        $crate::global::infof(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr; $($arg:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.notice(&[$(&$arg as &dyn ::std::fmt::Display),+])
    }};
    ($($arg:expr),+ $(,)?) => {
        $crate::global::notice(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

#[macro_export]
macro_rules! noticef {
    ($logger:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.noticef(::std::format_args!($($arg)+))
    }};
    ($($arg:tt)+) => {
        $crate::global::noticef(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr; $($arg:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.warning(&[$(&$arg as &dyn ::std::fmt::Display),+])
    }};
    ($($arg:expr),+ $(,)?) => {
        $crate::global::warning(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

#[macro_export]
macro_rules! warningf {
    ($logger:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.warningf(::std::format_args!($($arg)+))
    }};
    ($($arg:tt)+) => {
        $crate::global::warningf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr; $($arg:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.error(&[$(&$arg as &dyn ::std::fmt::Display),+])
    }};
    ($($arg:expr),+ $(,)?) => {
        $crate::global::error(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

#[macro_export]
macro_rules! errorf {
    ($logger:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.errorf(::std::format_args!($($arg)+))
    }};
    ($($arg:tt)+) => {
        $crate::global::errorf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr; $($arg:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.critical(&[$(&$arg as &dyn ::std::fmt::Display),+])
    }};
    ($($arg:expr),+ $(,)?) => {
        $crate::global::critical(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

#[macro_export]
macro_rules! criticalf {
    ($logger:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.criticalf(::std::format_args!($($arg)+))
    }};
    ($($arg:tt)+) => {
        $crate::global::criticalf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! alert {
    ($logger:expr; $($arg:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.alert(&[$(&$arg as &dyn ::std::fmt::Display),+])
    }};
    ($($arg:expr),+ $(,)?) => {
        $crate::global::alert(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

#[macro_export]
macro_rules! alertf {
    ($logger:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.alertf(::std::format_args!($($arg)+))
    }};
    ($($arg:tt)+) => {
        $crate::global::alertf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! emergency {
    ($logger:expr; $($arg:expr),+ $(,)?) => {{
        use $crate::Logger as _;
        $logger.emergency(&[$(&$arg as &dyn ::std::fmt::Display),+])
    }};
    ($($arg:expr),+ $(,)?) => {
        $crate::global::emergency(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

#[macro_export]
macro_rules! emergencyf {
    ($logger:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.emergencyf(::std::format_args!($($arg)+))
    }};
    ($($arg:tt)+) => {
        $crate::global::emergencyf(::std::format_args!($($arg)+))
    };
}
