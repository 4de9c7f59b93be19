#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use audit_insights::models::AuditRow;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// The three-row scenario: S1 answers Q1 twice (changing it once), S2 once with a
/// zero start timestamp.
pub fn scenario_rows() -> Vec<AuditRow> {
    vec![
        AuditRow::new("uuid:S1", "/data/Q1").with_times(1000.0, 3000.0),
        AuditRow::new("uuid:S1", "/data/Q1")
            .with_times(3000.0, 3000.0)
            .with_old_value("x"),
        AuditRow::new("uuid:S2", "/data/Q1").with_times(0.0, 2000.0),
    ]
}

/// A small ODK-style audit export with form-level rows mixed in.
pub const SAMPLE_AUDIT_CSV: &str = "instanceID,event,node,start,end,old-value,new-value,user\n\
uuid:S1,form start,,1000,,,,enum1\n\
uuid:S1,question,/data/name,1000,4000,,Ana,enum1\n\
uuid:S1,question,/data/age,4000,6000,,31,enum1\n\
uuid:S1,question,/data/name,6000,7000,Ana,Anna,enum1\n\
uuid:S1,form exit,,7000,,,,enum1\n\
uuid:S2,form start,,1000,,,,enum2\n\
uuid:S2,question,/data/name,1000,2000,,Bo,enum2\n\
uuid:S2,question,/data/age,2000,14000,,40,enum2\n\
uuid:S2,question,/data/age,14000,15000,40,41,enum2\n\
uuid:S2,question,/data/age,15000,16000,41,42,enum2\n\
uuid:S3,question,/data/name,500,2500,,Cy,enum1\n";

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}
