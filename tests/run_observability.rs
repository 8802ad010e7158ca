use std::sync::{Arc, Mutex};

use clip_filter::observability::{RunContext, RunObserver, RunStats, Severity};
use clip_filter::pipeline::{RunOptions, run_from_path};
use clip_filter::processing::Classifier;
use clip_filter::rules::{FieldAccessors, Rule};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<RunStats>>,
    failures: Mutex<Vec<Severity>>,
    alerts: Mutex<Vec<Severity>>,
}

impl RunObserver for RecordingObserver {
    fn on_success(&self, _ctx: &RunContext, stats: RunStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &RunContext, severity: Severity, _error: &clip_filter::FilterError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &RunContext, severity: Severity, _error: &clip_filter::FilterError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: &Arc<RecordingObserver>) -> RunOptions {
    RunOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: Severity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let out = tempfile::tempdir().unwrap();

    run_from_path("tests/fixtures/clips.csv", out.path(), &options(&obs)).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes, vec![RunStats { records: 10, valid: 4, invalid: 6 }]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let out = tempfile::tempdir().unwrap();

    // Missing file -> FileNotFound -> Critical
    let _ = run_from_path("tests/fixtures/does_not_exist.csv", out.path(), &options(&obs)).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![Severity::Critical]);
    assert_eq!(alerts, vec![Severity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_rule_error() {
    let obs = Arc::new(RecordingObserver::default());
    let out = tempfile::tempdir().unwrap();
    let opts = RunOptions {
        classifier: Classifier::new(vec![Rule::new("privacy", "~=", "anybody")], FieldAccessors::new()),
        ..options(&obs)
    };

    // Unsupported operator -> Error severity (not Critical) -> should not alert
    let _ = run_from_path("tests/fixtures/clips.csv", out.path(), &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![Severity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}
