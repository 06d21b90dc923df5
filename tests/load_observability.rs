use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use data_explorer::ingestion::{
    load_csv_from_path, FileObserver, IngestionObserver, LoadContext, LoadOptions, LoadStats, Severity,
};
use data_explorer::ExplorerError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<Severity>>,
    alerts: Mutex<Vec<Severity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: Severity, _error: &ExplorerError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: Severity, _error: &ExplorerError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn tmp_file(tag: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("data-explorer-{tag}-{nanos}.{ext}"))
}

fn options_with(obs: &Arc<RecordingObserver>) -> LoadOptions {
    LoadOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: Severity::Critical,
        ..Default::default()
    }
}

#[test]
fn success_reports_bytes_read() {
    let obs = Arc::new(RecordingObserver::default());
    let loaded = load_csv_from_path("tests/fixtures/malformed.csv", &options_with(&obs)).unwrap();

    assert_eq!(loaded.name, "malformed.csv");
    assert!(loaded.text.starts_with("Name,Age,City"));
    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![LoadStats {
            bytes: loaded.text.len()
        }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn missing_file_is_critical_and_alerts() {
    let obs = Arc::new(RecordingObserver::default());
    let err = load_csv_from_path("tests/fixtures/does_not_exist.csv", &options_with(&obs)).unwrap_err();

    assert!(matches!(err, ExplorerError::Io(_)));
    assert_eq!(obs.failures.lock().unwrap().clone(), vec![Severity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Critical]);
}

#[test]
fn wrong_extension_fails_without_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let err = load_csv_from_path("tests/fixtures/people.txt", &options_with(&obs)).unwrap_err();

    assert!(err.to_string().contains("expected a .csv file"));
    assert_eq!(obs.failures.lock().unwrap().clone(), vec![Severity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn extension_check_can_be_disabled() {
    let opts = LoadOptions {
        require_csv_extension: false,
        ..Default::default()
    };
    let loaded = load_csv_from_path("tests/fixtures/people.txt", &opts).unwrap();
    assert_eq!(loaded.text, "Name,Age\nJohn,25\n");
}

#[test]
fn oversized_file_is_rejected() {
    let path = tmp_file("big", "csv");
    std::fs::write(&path, "a,b\n1,2\n3,4\n").unwrap();

    let opts = LoadOptions {
        max_bytes: 4,
        ..Default::default()
    };
    let err = load_csv_from_path(&path, &opts).unwrap_err();
    match err {
        ExplorerError::FileTooLarge { size, limit, .. } => {
            assert_eq!(size, 12);
            assert_eq!(limit, 4);
        }
        other => panic!("unexpected error: {other}"),
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn invalid_utf8_is_rejected() {
    let path = tmp_file("binary", "csv");
    std::fs::write(&path, [0x61, 0x2c, 0xff, 0xfe, 0x0a]).unwrap();

    let err = load_csv_from_path(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, ExplorerError::InvalidUtf8 { .. }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_observer_appends_lines() {
    let log = tmp_file("log", "log");
    let opts = LoadOptions {
        observer: Some(Arc::new(FileObserver::new(&log))),
        ..Default::default()
    };

    load_csv_from_path("tests/fixtures/sales.csv", &opts).unwrap();
    let _ = load_csv_from_path("tests/fixtures/people.txt", &opts).unwrap_err();

    let contents = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(" ok path="));
    assert!(lines[1].contains(" fail severity=Error"));

    let _ = std::fs::remove_file(&log);
}
