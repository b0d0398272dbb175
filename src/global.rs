//! The process-wide default facade and the free functions that log through it.
//!
//! The default facade is created by the first call to [`init`] or [`init_with`]; every later call
//! is ignored and returns the instance created first. Logging through the free functions before
//! initialization does nothing.
use crate::backend::Backend;
use crate::facade::Facade;
use crate::logger::Logger;

use googlelog::{Entry, Severity};
use once_cell::sync::OnceCell;
use std::fmt::{self, Display};

static DEFAULT: OnceCell<Facade> = OnceCell::new();

/// Initializes the default facade for the log `name` of `backend`.
///
/// Only the first call, across all threads, obtains a backend logger. Concurrent callers block
/// until that one is done and all of them get the same facade.
pub fn init<B: Backend + ?Sized>(backend: &B, name: &str) -> &'static Facade {
    DEFAULT.get_or_init(|| Facade::new(backend, name))
}

/// Like [`init`] but with a caller-built facade, e.g. one with severity filtering switched on.
///
/// `make` only runs if the default facade does not exist yet.
pub fn init_with<F>(make: F) -> &'static Facade
where
    F: FnOnce() -> Facade,
{
    DEFAULT.get_or_init(make)
}

/// The default facade, if it was initialized.
pub fn default_facade() -> Option<&'static Facade> {
    DEFAULT.get()
}

#[inline]
fn with_default(f: impl FnOnce(&Facade)) {
    if let Some(facade) = DEFAULT.get() {
        f(facade)
    }
}

/// Submits an entry unchanged to the default facade.
pub fn log(entry: Entry) {
    with_default(|l| l.log(entry))
}

/// Sets the minimum severity of the default facade, see [`Logger::set_severity`].
pub fn set_severity(severity: &str) {
    with_default(|l| l.set_severity(severity))
}

/// The minimum severity of the default facade, [`Severity::Info`] if there is none.
pub fn severity() -> Severity {
    DEFAULT.get().map(Logger::severity).unwrap_or_default()
}

pub fn debug(args: &[&dyn Display]) {
    with_default(|l| l.debug(args))
}

pub fn debugf(args: fmt::Arguments<'_>) {
    with_default(|l| l.debugf(args))
}

pub fn info(args: &[&dyn Display]) {
    with_default(|l| l.info(args))
}

pub fn infof(args: fmt::Arguments<'_>) {
    with_default(|l| l.infof(args))
}

pub fn notice(args: &[&dyn Display]) {
    with_default(|l| l.notice(args))
}

pub fn noticef(args: fmt::Arguments<'_>) {
    with_default(|l| l.noticef(args))
}

pub fn warning(args: &[&dyn Display]) {
    with_default(|l| l.warning(args))
}

pub fn warningf(args: fmt::Arguments<'_>) {
    with_default(|l| l.warningf(args))
}

pub fn error(args: &[&dyn Display]) {
    with_default(|l| l.error(args))
}

pub fn errorf(args: fmt::Arguments<'_>) {
    with_default(|l| l.errorf(args))
}

pub fn critical(args: &[&dyn Display]) {
    with_default(|l| l.critical(args))
}

pub fn criticalf(args: fmt::Arguments<'_>) {
    with_default(|l| l.criticalf(args))
}

pub fn alert(args: &[&dyn Display]) {
    with_default(|l| l.alert(args))
}

pub fn alertf(args: fmt::Arguments<'_>) {
    with_default(|l| l.alertf(args))
}

pub fn emergency(args: &[&dyn Display]) {
    with_default(|l| l.emergency(args))
}

pub fn emergencyf(args: fmt::Arguments<'_>) {
    with_default(|l| l.emergencyf(args))
}
