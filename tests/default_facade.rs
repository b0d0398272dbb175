use gcplog::testing::MemoryBackend;
use gcplog::{Entry, Logger, Severity};
use pretty_assertions::assert_eq;
use std::sync::Barrier;
use std::thread;

// One test per file: the default facade lives for the whole test process.
#[test]
fn racing_initializers_construct_exactly_one_logger() {
    let backend_x = MemoryBackend::new();
    let backend_y = MemoryBackend::new();
    let barrier = Barrier::new(8);

    let names: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (backend, name) = if i % 2 == 0 {
                    (&backend_x, "n1")
                } else {
                    (&backend_y, "n2")
                };
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    gcplog::init(backend, name).name().to_string()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Every caller saw the same instance
    assert!(names.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(
        backend_x.loggers_created() + backend_y.loggers_created(),
        1
    );

    // Later initializations are ignored, whatever their arguments
    let late = MemoryBackend::new();
    let facade = gcplog::init(&late, "n3");
    assert_eq!(facade.name(), names[0]);
    assert_eq!(late.loggers_created(), 0);
    assert!(std::ptr::eq(facade, gcplog::default_facade().unwrap()));

    gcplog::info(&[&"hi"]);
    gcplog::infof(format_args!("{} {}", "hi", "again"));
    gcplog::warning!("a", 1, 'b');
    gcplog::criticalf!("code {:03}", 7);
    gcplog::log(Entry::new("raw").with_severity(Severity::Alert));

    let (winner, loser) = if backend_x.loggers_created() == 1 {
        (&backend_x, &backend_y)
    } else {
        (&backend_y, &backend_x)
    };
    assert!(loser.entries().is_empty());

    let got: Vec<_> = winner
        .entries()
        .into_iter()
        .map(|r| (r.logger, r.entry.severity, r.entry.text().map(str::to_string)))
        .collect();
    let name = names[0].clone();
    assert_eq!(
        got,
        vec![
            (name.clone(), Some(Severity::Info), Some("hi".to_string())),
            (name.clone(), Some(Severity::Info), Some("hi again".to_string())),
            (name.clone(), Some(Severity::Warning), Some("a1b".to_string())),
            (name.clone(), Some(Severity::Critical), Some("code 007".to_string())),
            (name, Some(Severity::Alert), Some("raw".to_string())),
        ]
    );

    // The minimum severity is recorded but does not filter
    gcplog::set_severity("emergency");
    assert_eq!(gcplog::severity(), Severity::Emergency);
    assert_eq!(facade.severity(), Severity::Emergency);
    gcplog::debug!("still delivered");
    assert_eq!(winner.entries().len(), 6);

    gcplog::set_severity("not-a-real-level");
    assert_eq!(gcplog::severity(), Severity::Info);
}
