//! Configuration through environment variables.
use crate::diagnostics;
use crate::error::Error;
use crate::facade::Facade;
use crate::global;
use crate::logger::Logger;

use std::env;

/// An environment variable, with or without a default value.
pub enum Arg {
    NoDefault(&'static str),
    WithDefault(&'static str, &'static str),
}

pub const PROJECT_ID: Arg = Arg::NoDefault("GCPLOG_PROJECT_ID");
pub const LOG_NAME: Arg = Arg::WithDefault("GCPLOG_LOG_NAME", "gcplog");
pub const RESOURCE_TYPE: Arg = Arg::WithDefault("GCPLOG_RESOURCE_TYPE", "global");
pub const SEVERITY: Arg = Arg::WithDefault("GCPLOG_SEVERITY", "info");
pub const SEVERITY_FILTER: Arg = Arg::WithDefault("GCPLOG_SEVERITY_FILTER", "false");
pub const DEFAULT_LABELS: Arg = Arg::NoDefault("GCPLOG_DEFAULT_LABELS");
pub const RESOURCE_LABELS: Arg = Arg::NoDefault("GCPLOG_RESOURCE_LABELS");
pub const LOG_LEVEL_LABEL: Arg = Arg::NoDefault("GCPLOG_LOG_LEVEL_LABEL");

impl Arg {
    pub fn name(&self) -> &'static str {
        match self {
            Arg::NoDefault(name) | Arg::WithDefault(name, _) => *name,
        }
    }

    /// The value from `lookup`, falling back to the default if there is one.
    pub fn val<F>(&self, lookup: &F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            Arg::NoDefault(name) => lookup(*name),
            Arg::WithDefault(name, default) => lookup(*name).or_else(|| Some(default.to_string())),
        }
    }

    fn required<F>(&self, lookup: &F) -> Result<String, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.val(lookup)
            .ok_or_else(|| Error::MissingVariable(self.name().to_string()))
    }

    fn json<F>(&self, lookup: &F) -> Result<Option<serde_json::Value>, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.val(lookup)
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|e| Error::InvalidVariable {
                    name: self.name().to_string(),
                    reason: format!("not valid JSON: {}", e),
                })
            })
            .transpose()
    }

    fn flag<F>(&self, lookup: &F) -> Result<bool, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.val(lookup).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("false") | Some("0") | Some("") => Ok(false),
            Some("true") | Some("1") => Ok(true),
            Some(other) => Err(Error::InvalidVariable {
                name: self.name().to_string(),
                reason: format!("expected true or false, got '{}'", other),
            }),
        }
    }
}

/// Settings for the default facade and its Cloud Logging client.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub project_id: String,
    pub log_name: String,
    pub resource_type: String,
    pub severity: String,
    pub severity_filter: bool,
    pub default_labels: Option<serde_json::Value>,
    pub resource_labels: Option<serde_json::Value>,
    pub log_level_label: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration from any name to value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_id = PROJECT_ID.required(&lookup)?;
        if project_id.trim().is_empty() {
            return Err(Error::InvalidVariable {
                name: PROJECT_ID.name().to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(Config {
            project_id,
            log_name: LOG_NAME.required(&lookup)?,
            resource_type: RESOURCE_TYPE.required(&lookup)?,
            severity: SEVERITY.required(&lookup)?,
            severity_filter: SEVERITY_FILTER.flag(&lookup)?,
            default_labels: DEFAULT_LABELS.json(&lookup)?,
            resource_labels: RESOURCE_LABELS.json(&lookup)?,
            log_level_label: LOG_LEVEL_LABEL.val(&lookup),
        })
    }

    /// A Cloud Logging client builder with the configured project, resource and labels.
    pub fn client_builder(&self) -> Result<googlelog::Builder, Error> {
        let mut builder = googlelog::Builder::new(&self.project_id, &self.resource_type);
        if let Some(labels) = &self.default_labels {
            builder = builder.with_default_labels(labels.clone())?;
        }
        if let Some(labels) = &self.resource_labels {
            builder = builder.with_resource_labels(labels.clone())?;
        }
        if let Some(label) = &self.log_level_label {
            builder = builder.with_log_level_label(label);
        }
        Ok(builder)
    }

    /// Builds a facade for the configured log name, minimum severity and filtering.
    pub fn facade<B: crate::Backend + ?Sized>(&self, backend: &B) -> Facade {
        let facade = Facade::new(backend, &self.log_name).with_severity_filter(self.severity_filter);
        facade.set_severity(&self.severity);
        facade
    }

    /// Initializes the default facade with a Cloud Logging client whose shipper runs on `handle`.
    ///
    /// Shipping failures are reported on stderr. If the default facade already exists nothing is
    /// set up and the existing one is returned.
    pub fn init(&self, handle: &tokio::runtime::Handle) -> Result<&'static Facade, Error> {
        if let Some(facade) = global::default_facade() {
            return Ok(facade);
        }

        let (client, shipper) = self.client_builder()?.build_with_async_shipper();
        shipper
            .with_diagnostics(diagnostics::stderr_logger(diagnostics::level_for(&self.severity)))
            .spawn(handle);

        Ok(global::init_with(|| self.facade(&client)))
    }
}

/// Reads [`Config`] from the environment and initializes the default facade with it.
pub fn init_from_env(handle: &tokio::runtime::Handle) -> Result<&'static Facade, Error> {
    Config::from_env()?.init(handle)
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::error::Error;
    use crate::logger::Logger;
    use crate::testing::MemoryBackend;
    use googlelog::Severity;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_project_is_set() {
        let config = Config::from_lookup(lookup(&[("GCPLOG_PROJECT_ID", "my-project")])).unwrap();
        assert_eq!(
            config,
            Config {
                project_id: "my-project".to_string(),
                log_name: "gcplog".to_string(),
                resource_type: "global".to_string(),
                severity: "info".to_string(),
                severity_filter: false,
                default_labels: None,
                resource_labels: None,
                log_level_label: None,
            }
        );
    }

    #[test]
    fn all_variables_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("GCPLOG_PROJECT_ID", "p"),
            ("GCPLOG_LOG_NAME", "svc-a"),
            ("GCPLOG_RESOURCE_TYPE", "k8s_container"),
            ("GCPLOG_SEVERITY", "warning"),
            ("GCPLOG_SEVERITY_FILTER", "TRUE"),
            ("GCPLOG_DEFAULT_LABELS", r#"{"team": "core"}"#),
            ("GCPLOG_RESOURCE_LABELS", r#"{"cluster_name": "c1"}"#),
            ("GCPLOG_LOG_LEVEL_LABEL", "level"),
        ]))
        .unwrap();

        assert_eq!(config.log_name, "svc-a");
        assert_eq!(config.resource_type, "k8s_container");
        assert!(config.severity_filter);
        assert_eq!(config.default_labels, Some(json!({"team": "core"})));
        assert_eq!(config.resource_labels, Some(json!({"cluster_name": "c1"})));
        assert_eq!(config.log_level_label.as_deref(), Some("level"));
        assert!(config.client_builder().is_ok());
    }

    #[test]
    fn project_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingVariable(name) if name == "GCPLOG_PROJECT_ID"));

        let err = Config::from_lookup(lookup(&[("GCPLOG_PROJECT_ID", " ")])).unwrap_err();
        assert!(matches!(err, Error::InvalidVariable { .. }));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("GCPLOG_PROJECT_ID", "p"),
            ("GCPLOG_DEFAULT_LABELS", "{not json"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidVariable { name, .. } if name == "GCPLOG_DEFAULT_LABELS"));

        let err = Config::from_lookup(lookup(&[
            ("GCPLOG_PROJECT_ID", "p"),
            ("GCPLOG_SEVERITY_FILTER", "sometimes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidVariable { name, .. } if name == "GCPLOG_SEVERITY_FILTER"));
    }

    #[test]
    fn labels_that_are_not_string_maps_fail_the_client_builder() {
        let config = Config::from_lookup(lookup(&[
            ("GCPLOG_PROJECT_ID", "p"),
            ("GCPLOG_RESOURCE_LABELS", r#"{"zone": 1}"#),
        ]))
        .unwrap();
        assert!(matches!(config.client_builder(), Err(Error::Backend(_))));
    }

    #[test]
    fn facade_follows_the_configuration() {
        let config = Config::from_lookup(lookup(&[
            ("GCPLOG_PROJECT_ID", "p"),
            ("GCPLOG_LOG_NAME", "svc-b"),
            ("GCPLOG_SEVERITY", "error"),
            ("GCPLOG_SEVERITY_FILTER", "1"),
        ]))
        .unwrap();
        let backend = MemoryBackend::new();
        let facade = config.facade(&backend);

        assert_eq!(facade.name(), "svc-b");
        assert_eq!(facade.severity(), Severity::Error);
        facade.warning(&[&"filtered"]);
        facade.error(&[&"kept"]);
        assert_eq!(backend.entries().len(), 1);
        assert_eq!(backend.logger_names(), vec!["svc-b".to_string()]);
    }
}
