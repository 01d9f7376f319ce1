use std::path::Path;

use crate::config::TestConfiguration;

use super::error::{ConsistencyError, ReconcileError};
use super::loader::{read_log, read_ragged_log};
use super::model::Log;
use super::select::select_best;

// ---------------------------------------------------------------------------
// ReconciledRun – target and estimate aligned step by step
// ---------------------------------------------------------------------------

/// The estimate side of a reconciled run.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    /// One record per step, used as logged.
    Point(Log),
    /// Highest-weighted particle of each step.
    BestParticle { log: Log, particles: usize },
    /// Lengths cannot be aligned; no estimate is produced.
    Irreconcilable { target_len: usize, estimate_len: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledRun {
    pub name: String,
    pub target: Log,
    pub estimate: Estimate,
}

impl ReconciledRun {
    /// The aligned estimate, absent when the logs were irreconcilable.
    pub fn estimate(&self) -> Option<&Log> {
        match &self.estimate {
            Estimate::Point(log) | Estimate::BestParticle { log, .. } => Some(log),
            Estimate::Irreconcilable { .. } => None,
        }
    }

    /// Particle count for particle runs.
    pub fn particles(&self) -> Option<usize> {
        match self.estimate {
            Estimate::BestParticle { particles, .. } => Some(particles),
            _ => None,
        }
    }

    /// Number of simulation steps.
    pub fn steps(&self) -> usize {
        self.target.len()
    }

    /// Strict accessor: an irreconcilable run becomes an error.
    pub fn into_pair(self) -> Result<(Log, Log), ReconcileError> {
        match self.estimate {
            Estimate::Point(log) | Estimate::BestParticle { log, .. } => Ok((self.target, log)),
            Estimate::Irreconcilable {
                target_len,
                estimate_len,
            } => Err(ReconcileError::IrreconcilableLength {
                run: self.name,
                target_len,
                estimate_len,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Read the logs of `config` below `base_dir` and align them.
///
/// * equal lengths → the estimate is used unchanged;
/// * estimate an exact multiple of the target → particle log, reduced to the
///   best particle per step with the weights log;
/// * anything else → [`Estimate::Irreconcilable`].
pub fn reconcile(base_dir: &Path, config: &TestConfiguration) -> Result<ReconciledRun, ReconcileError> {
    let log_err = |source| ReconcileError::Log {
        run: config.name.clone(),
        source,
    };
    let target = read_log(&config.target_path(base_dir)).map_err(log_err)?;
    let estimate = read_log(&config.estimate_path(base_dir)).map_err(log_err)?;

    let estimate = align(config, base_dir, &target, estimate)?;

    Ok(ReconciledRun {
        name: config.name.clone(),
        target,
        estimate,
    })
}

fn align(
    config: &TestConfiguration,
    base_dir: &Path,
    target: &Log,
    estimate: Log,
) -> Result<Estimate, ReconcileError> {
    let (target_len, estimate_len) = (target.len(), estimate.len());

    if target_len == estimate_len {
        return Ok(Estimate::Point(estimate));
    }

    if target_len == 0 || estimate_len < target_len || estimate_len % target_len != 0 {
        log::warn!(
            "run {}: bad records, target {target_len} vs estimate {estimate_len}",
            config.name
        );
        return Ok(Estimate::Irreconcilable {
            target_len,
            estimate_len,
        });
    }

    let particles = estimate_len / target_len;
    let consistency = |source| ReconcileError::Consistency {
        run: config.name.clone(),
        source,
    };

    let weights_path = config
        .weights_path(base_dir)
        .ok_or(ConsistencyError::MissingWeightsLog { particles })
        .map_err(consistency)?;
    let weights = read_ragged_log(&weights_path).map_err(|source| ReconcileError::Log {
        run: config.name.clone(),
        source,
    })?;

    if weights.len() != target_len {
        return Err(consistency(ConsistencyError::StepCount {
            target_len,
            weights_len: weights.len(),
        }));
    }
    if weights.arity() != particles {
        return Err(consistency(ConsistencyError::ParticleCount {
            expected: particles,
            found: weights.arity(),
        }));
    }

    log::info!("run {}: {particles} particles per step", config.name);
    let log = select_best(&estimate, &weights).map_err(consistency)?;
    Ok(Estimate::BestParticle { log, particles })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::Record;

    fn write(dir: &Path, name: &str, rows: Vec<Vec<f64>>) {
        let text: String = rows
            .into_iter()
            .map(|r| format!("{}\n", Record::new(r)))
            .collect();
        std::fs::write(dir.join(name), text).unwrap();
    }

    fn config(weights: Option<&str>) -> TestConfiguration {
        TestConfiguration {
            name: "T".into(),
            directory: PathBuf::from("run"),
            target: "target.txt".into(),
            estimate: "estimate.txt".into(),
            weights: weights.map(PathBuf::from),
            color: None,
        }
    }

    fn setup() -> (tempfile::TempDir, PathBuf) {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join("run");
        std::fs::create_dir(&dir).unwrap();
        (base, dir)
    }

    #[test]
    fn equal_lengths_pass_through() {
        let (base, dir) = setup();
        write(&dir, "target.txt", vec![vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]]);
        write(&dir, "estimate.txt", vec![vec![1.1, 0.0], vec![2.1, 0.0], vec![2.9, 0.0]]);

        let run = reconcile(base.path(), &config(None)).unwrap();
        assert_eq!(run.steps(), 3);
        assert_eq!(run.particles(), None);
        let (target, estimate) = run.into_pair().unwrap();
        assert_eq!(target[2].values(), &[3.0, 0.0]);
        assert_eq!(estimate[2].values(), &[2.9, 0.0]);
    }

    #[test]
    fn particle_log_reduced_to_best() {
        let (base, dir) = setup();
        write(&dir, "target.txt", vec![vec![0.0], vec![1.0]]);
        write(
            &dir,
            "estimate.txt",
            vec![vec![10.0], vec![11.0], vec![12.0], vec![20.0], vec![21.0], vec![22.0]],
        );
        write(&dir, "weights.txt", vec![vec![0.1, 0.5, 0.4], vec![0.2, 0.2, 0.6]]);

        let run = reconcile(base.path(), &config(Some("weights.txt"))).unwrap();
        assert_eq!(run.particles(), Some(3));
        let estimate = run.estimate().unwrap();
        assert_eq!(estimate[0].values(), &[11.0]);
        assert_eq!(estimate[1].values(), &[22.0]);
    }

    #[test]
    fn non_multiple_is_irreconcilable() {
        let (base, dir) = setup();
        write(&dir, "target.txt", vec![vec![0.0]; 4]);
        write(&dir, "estimate.txt", vec![vec![0.0]; 5]);

        let run = reconcile(base.path(), &config(None)).unwrap();
        assert_eq!(run.estimate(), None);
        assert_eq!(
            run.estimate,
            Estimate::Irreconcilable {
                target_len: 4,
                estimate_len: 5
            }
        );
        assert!(matches!(
            run.into_pair(),
            Err(ReconcileError::IrreconcilableLength {
                target_len: 4,
                estimate_len: 5,
                ..
            })
        ));
    }

    #[test]
    fn shorter_estimate_is_irreconcilable() {
        let (base, dir) = setup();
        write(&dir, "target.txt", vec![vec![0.0]; 4]);
        write(&dir, "estimate.txt", vec![vec![0.0]; 2]);

        let run = reconcile(base.path(), &config(None)).unwrap();
        assert!(run.estimate().is_none());
    }

    #[test]
    fn empty_target_with_estimate_is_irreconcilable() {
        let (base, dir) = setup();
        write(&dir, "target.txt", vec![]);
        write(&dir, "estimate.txt", vec![vec![0.0]; 2]);

        let run = reconcile(base.path(), &config(None)).unwrap();
        assert!(run.estimate().is_none());
    }

    #[test]
    fn missing_weights_config_is_consistency_error() {
        let (base, dir) = setup();
        write(&dir, "target.txt", vec![vec![0.0]; 2]);
        write(&dir, "estimate.txt", vec![vec![0.0]; 4]);

        let err = reconcile(base.path(), &config(None)).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::Consistency {
                source: ConsistencyError::MissingWeightsLog { particles: 2 },
                ..
            }
        ));
    }

    #[test]
    fn weights_step_count_checked() {
        let (base, dir) = setup();
        write(&dir, "target.txt", vec![vec![0.0]; 2]);
        write(&dir, "estimate.txt", vec![vec![0.0]; 4]);
        write(&dir, "weights.txt", vec![vec![0.5, 0.5]; 3]);

        let err = reconcile(base.path(), &config(Some("weights.txt"))).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::Consistency {
                source: ConsistencyError::StepCount {
                    target_len: 2,
                    weights_len: 3
                },
                ..
            }
        ));
    }

    #[test]
    fn ragged_weights_are_consistency_error() {
        let (base, dir) = setup();
        write(&dir, "target.txt", vec![vec![0.0]; 2]);
        write(&dir, "estimate.txt", vec![vec![0.0]; 4]);
        write(&dir, "weights.txt", vec![vec![0.5, 0.5], vec![1.0]]);

        let err = reconcile(base.path(), &config(Some("weights.txt"))).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::Consistency {
                source: ConsistencyError::RaggedWeights {
                    step: 1,
                    expected: 2,
                    found: 1
                },
                ..
            }
        ));
    }

    #[test]
    fn weights_particle_count_checked() {
        let (base, dir) = setup();
        write(&dir, "target.txt", vec![vec![0.0]; 2]);
        write(&dir, "estimate.txt", vec![vec![0.0]; 4]);
        write(&dir, "weights.txt", vec![vec![0.3, 0.3, 0.4]; 2]);

        let err = reconcile(base.path(), &config(Some("weights.txt"))).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::Consistency {
                source: ConsistencyError::ParticleCount {
                    expected: 2,
                    found: 3
                },
                ..
            }
        ));
    }

    #[test]
    fn unreadable_target_names_the_run() {
        let (base, _dir) = setup();
        let err = reconcile(base.path(), &config(None)).unwrap_err();
        assert!(err.to_string().starts_with("run T:"));
    }
}
