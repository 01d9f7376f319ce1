use std::fmt;

use super::error::CrossRunMismatch;
use super::model::{Log, Record};

// ---------------------------------------------------------------------------
// Nested – a numeric leaf or a sequence of nested values
// ---------------------------------------------------------------------------

/// Shape-agnostic view of numeric data used for structural comparison.
#[derive(Debug, Clone)]
pub enum Nested {
    Leaf(f64),
    Seq(Vec<Nested>),
}

impl From<&Record> for Nested {
    fn from(r: &Record) -> Self {
        Nested::Seq(r.values().iter().copied().map(Nested::Leaf).collect())
    }
}

impl From<&Log> for Nested {
    fn from(log: &Log) -> Self {
        Nested::Seq(log.iter().map(Nested::from).collect())
    }
}

/// Exact structural equality. Leaves compare with `==`, except that two NaNs
/// are equal so every value equals itself.
pub fn structurally_equal(a: &Nested, b: &Nested) -> bool {
    match (a, b) {
        (Nested::Leaf(x), Nested::Leaf(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Nested::Seq(xs), Nested::Seq(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| structurally_equal(x, y))
        }
        _ => false,
    }
}

impl PartialEq for Nested {
    fn eq(&self, other: &Self) -> bool {
        structurally_equal(self, other)
    }
}

// ---------------------------------------------------------------------------
// Log-level helpers
// ---------------------------------------------------------------------------

/// Where two logs first disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    Length { left: usize, right: usize },
    Record { index: usize },
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Length { left, right } => {
                write!(f, "{left} records vs {right} records")
            }
            Difference::Record { index } => write!(f, "records differ at step {index}"),
        }
    }
}

pub fn logs_equal(a: &Log, b: &Log) -> bool {
    structurally_equal(&Nested::from(a), &Nested::from(b))
}

pub fn first_difference(a: &Log, b: &Log) -> Option<Difference> {
    if a.len() != b.len() {
        return Some(Difference::Length {
            left: a.len(),
            right: b.len(),
        });
    }
    a.iter()
        .zip(b.iter())
        .position(|(x, y)| !structurally_equal(&Nested::from(x), &Nested::from(y)))
        .map(|index| Difference::Record { index })
}

/// Check that `run`'s target trajectory is identical to the reference run's.
pub fn ensure_same_target(
    reference: (&str, &Log),
    run: (&str, &Log),
) -> Result<(), CrossRunMismatch> {
    match first_difference(reference.1, run.1) {
        None => Ok(()),
        Some(difference) => Err(CrossRunMismatch {
            reference: reference.0.to_string(),
            run: run.0.to_string(),
            difference,
        }),
    }
}
