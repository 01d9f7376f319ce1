use crate::config::SessionConfig;

use super::compare::ensure_same_target;
use super::error::SessionError;
use super::model::Log;
use super::reconcile::{ReconciledRun, reconcile};

// ---------------------------------------------------------------------------
// Session – several runs against one shared ground truth
// ---------------------------------------------------------------------------

/// Reconciled runs that all share the same target trajectory. Only built by
/// [`Session::load`], so it always holds at least one run.
#[derive(Debug, Clone)]
pub struct Session {
    runs: Vec<ReconciledRun>,
}

impl Session {
    /// Reconcile every selected run and check that all targets agree with the
    /// first run's. Any failure aborts the whole session.
    pub fn load(config: &SessionConfig) -> Result<Self, SessionError> {
        let names = config.plotted_names();
        if names.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut runs: Vec<ReconciledRun> = Vec::with_capacity(names.len());
        for name in &names {
            let run_config = config
                .run(name)
                .ok_or_else(|| SessionError::UnknownRun(name.clone()))?;
            let run = reconcile(&config.base_dir, run_config)?;

            if let Some(reference) = runs.first() {
                ensure_same_target(
                    (reference.name.as_str(), &reference.target),
                    (run.name.as_str(), &run.target),
                )?;
            }
            runs.push(run);
        }

        let session = Session { runs };
        log::info!(
            "session: {} runs over {} steps ({} without estimate)",
            session.runs.len(),
            session.steps(),
            session.runs.iter().filter(|r| r.estimate().is_none()).count()
        );
        Ok(session)
    }

    /// Runs in plotting order; the first one supplied the reference target.
    pub fn runs(&self) -> &[ReconciledRun] {
        &self.runs
    }

    /// The shared ground-truth trajectory.
    pub fn target(&self) -> &Log {
        &self.runs[0].target
    }

    pub fn steps(&self) -> usize {
        self.target().len()
    }

    /// Widest record among the target and all estimates.
    pub fn max_arity(&self) -> usize {
        self.runs
            .iter()
            .flat_map(|r| std::iter::once(&r.target).chain(r.estimate()))
            .map(Log::arity)
            .max()
            .unwrap_or(0)
    }
}
