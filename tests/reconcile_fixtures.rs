use std::path::Path;

use trajview::config::SessionConfig;
use trajview::data::compare::{Difference, logs_equal};
use trajview::data::error::SessionError;
use trajview::data::loader::read_log;
use trajview::data::reconcile::{Estimate, reconcile};
use trajview::data::session::Session;

fn fixture_config() -> SessionConfig {
    SessionConfig::from_file(Path::new("tests/data/session.json")).unwrap()
}

#[test]
fn point_estimate_run_is_unchanged() {
    let config = fixture_config();
    let kf = config.run("KF").unwrap();

    let run = reconcile(&config.base_dir, kf).unwrap();
    let raw_estimate = read_log(&kf.estimate_path(&config.base_dir)).unwrap();

    assert_eq!(run.steps(), 3);
    assert_eq!(run.target.arity(), 4);
    assert!(matches!(run.estimate, Estimate::Point(_)));
    assert_eq!(run.estimate().unwrap().records(), raw_estimate.records());
    assert!(logs_equal(&run.target, &run.target.clone()));
}

#[test]
fn particle_run_keeps_heaviest_particles() {
    let config = fixture_config();
    let sis = config.run("SIS").unwrap();

    let run = reconcile(&config.base_dir, sis).unwrap();
    let particles = read_log(&sis.estimate_path(&config.base_dir)).unwrap();

    assert_eq!(run.particles(), Some(3));
    let best = run.estimate().unwrap();
    assert_eq!(best.len(), 2);
    assert_eq!(best[0], particles[1]);
    assert_eq!(best[1], particles[5]);
}

#[test]
fn irreconcilable_run_has_no_estimate() {
    let config = fixture_config();
    let run = reconcile(&config.base_dir, config.run("BAD").unwrap()).unwrap();

    assert_eq!(run.estimate(), None);
    assert_eq!(
        run.estimate,
        Estimate::Irreconcilable {
            target_len: 4,
            estimate_len: 5
        }
    );
}

#[test]
fn session_overlays_runs_sharing_a_target() {
    let session = Session::load(&fixture_config()).unwrap();

    assert_eq!(session.runs().len(), 2);
    assert_eq!(session.steps(), 2);
    assert_eq!(session.max_arity(), 1);
    assert!(logs_equal(&session.runs()[0].target, &session.runs()[1].target));
}

#[test]
fn session_rejects_diverging_targets() {
    let mut config = fixture_config();
    config.plot = Some(vec!["UKF".into(), "SIS-shifted".into()]);

    match Session::load(&config) {
        Err(SessionError::CrossRun(mismatch)) => {
            assert_eq!(mismatch.reference, "UKF");
            assert_eq!(mismatch.run, "SIS-shifted");
            assert_eq!(mismatch.difference, Difference::Record { index: 1 });
        }
        other => panic!("expected cross-run mismatch, got {other:?}"),
    }
}

#[test]
fn session_keeps_irreconcilable_run_with_matching_target() {
    let mut config = fixture_config();
    config.plot = Some(vec!["UKF".into(), "BAD-shared".into()]);

    let session = Session::load(&config).unwrap();
    assert_eq!(session.runs().len(), 2);
    assert!(session.runs()[0].estimate().is_some());
    assert_eq!(
        session.runs()[1].estimate,
        Estimate::Irreconcilable {
            target_len: 2,
            estimate_len: 3
        }
    );
}

#[test]
fn irreconcilable_run_still_checked_against_shared_target() {
    let mut config = fixture_config();
    config.plot = Some(vec!["UKF".into(), "BAD".into()]);

    match Session::load(&config) {
        Err(SessionError::CrossRun(mismatch)) => {
            assert_eq!(mismatch.run, "BAD");
            assert_eq!(mismatch.difference, Difference::Length { left: 2, right: 4 });
        }
        other => panic!("expected cross-run mismatch, got {other:?}"),
    }
}

#[test]
fn session_rejects_unknown_run() {
    let mut config = fixture_config();
    config.plot = Some(vec!["EKF".into()]);
    assert!(matches!(
        Session::load(&config),
        Err(SessionError::UnknownRun(name)) if name == "EKF"
    ));
}

#[test]
fn session_rejects_empty_selection() {
    let mut config = fixture_config();
    config.plot = Some(vec![]);
    assert!(matches!(Session::load(&config), Err(SessionError::Empty)));
}
