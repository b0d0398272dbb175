use gcplog::testing::MemoryBackend;
use gcplog::{Entry, Facade, Logger, Severity};
use pretty_assertions::assert_eq;

#[test]
fn free_functions_are_no_ops_until_initialized() {
    assert!(gcplog::default_facade().is_none());

    gcplog::info(&[&"dropped"]);
    gcplog::errorf!("dropped {}", 1);
    gcplog::log(Entry::new("dropped"));
    gcplog::set_severity("alert");
    assert_eq!(gcplog::severity(), Severity::Info);

    let backend = MemoryBackend::new();
    let facade = gcplog::init_with(|| Facade::new(&backend, "filtered").with_severity_filter(true));
    assert!(facade.filters_by_severity());
    // Nothing logged before initialization is replayed
    assert!(backend.entries().is_empty());

    gcplog::set_severity("error");
    gcplog::warning(&[&"below the minimum"]);
    gcplog::error(&[&"at the minimum"]);

    let entries = backend.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry.text(), Some("at the minimum"));

    // init_with does not run its constructor once the default exists
    let facade = gcplog::init_with(|| panic!("must not be called"));
    assert_eq!(facade.name(), "filtered");
}
