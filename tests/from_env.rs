use gcplog::{Config, Logger, Severity};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

#[tokio::test(flavor = "multi_thread")]
async fn config_initializes_the_default_facade() {
    let vars = HashMap::from([
        ("GCPLOG_PROJECT_ID", "my-project"),
        ("GCPLOG_LOG_NAME", "svc-env"),
        ("GCPLOG_SEVERITY", "notice"),
    ]);
    let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();

    let handle = tokio::runtime::Handle::current();
    let facade = config.init(&handle).unwrap();
    assert_eq!(facade.name(), "svc-env");
    assert_eq!(facade.severity(), Severity::Notice);
    assert!(!facade.filters_by_severity());

    // A second configuration does not replace the default facade
    let other = Config {
        log_name: "other".to_string(),
        ..config
    };
    let again = other.init(&handle).unwrap();
    assert!(std::ptr::eq(facade, again));
    assert_eq!(gcplog::default_facade().map(|f| f.name()), Some("svc-env"));
}
