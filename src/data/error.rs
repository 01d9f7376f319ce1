use std::path::PathBuf;

use thiserror::Error;

use super::compare::Difference;

// ---------------------------------------------------------------------------
// Log reading
// ---------------------------------------------------------------------------

/// Failure while reading a single log file. Fatal for that file.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("{}: cannot read log: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: '{token}' is not a number", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: expected {expected} values per record, found {found}", .path.display())]
    Arity {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Particle extraction
// ---------------------------------------------------------------------------

/// The estimate log and its weights log disagree on shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("estimate has {particles} records per step but no weights log is configured")]
    MissingWeightsLog { particles: usize },

    #[error("weights log has {weights_len} steps, target has {target_len}")]
    StepCount { target_len: usize, weights_len: usize },

    #[error("weights log has {found} particles per step, estimate implies {expected}")]
    ParticleCount { expected: usize, found: usize },

    #[error("weights at step {step} have {found} particles, step 0 has {expected}")]
    RaggedWeights {
        step: usize,
        expected: usize,
        found: usize,
    },

    #[error("weights log has {steps} steps but zero particles")]
    EmptyWeights { steps: usize },

    #[error("estimate has {estimate_len} records, expected {steps} steps x {particles} particles")]
    EstimateCount {
        estimate_len: usize,
        steps: usize,
        particles: usize,
    },
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("run {run}: {source}")]
    Log {
        run: String,
        #[source]
        source: LogError,
    },

    #[error("run {run}: {source}")]
    Consistency {
        run: String,
        #[source]
        source: ConsistencyError,
    },

    #[error("run {run}: target has {target_len} records, estimate has {estimate_len} (not a multiple)")]
    IrreconcilableLength {
        run: String,
        target_len: usize,
        estimate_len: usize,
    },
}

// ---------------------------------------------------------------------------
// Cross-run checks
// ---------------------------------------------------------------------------

/// Two runs expected to share a ground-truth trajectory do not.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("target of run {run} differs from target of run {reference}: {difference}")]
pub struct CrossRunMismatch {
    pub reference: String,
    pub run: String,
    pub difference: Difference,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no runs selected")]
    Empty,

    #[error("unknown run '{0}' in plot selection")]
    UnknownRun(String),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    CrossRun(#[from] CrossRunMismatch),
}
