use super::error::ConsistencyError;
use super::model::Log;

// ---------------------------------------------------------------------------
// Best-hypothesis selection
// ---------------------------------------------------------------------------

/// Index of the largest weight. Ties go to the lowest index; NaN never wins.
pub fn argmax(weights: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &w) in weights.iter().enumerate() {
        if w.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if w <= b => {}
            _ => best = Some((i, w)),
        }
    }
    best.map(|(i, _)| i)
}

/// Pick the highest-weighted particle of every timestep.
///
/// `estimate` is a T×P grid flattened step-major (all particles of step 0,
/// then step 1, ...), `weights` holds one vector of P weights per step.
/// Returns T records: record `t` is `estimate[t * P + argmax(weights[t])]`.
pub fn select_best(estimate: &Log, weights: &Log) -> Result<Log, ConsistencyError> {
    let steps = weights.len();
    let particles = weights.arity();

    for (step, w) in weights.iter().enumerate() {
        if w.len() != particles {
            return Err(ConsistencyError::RaggedWeights {
                step,
                expected: particles,
                found: w.len(),
            });
        }
    }

    if steps > 0 && particles == 0 {
        return Err(ConsistencyError::EmptyWeights { steps });
    }

    if estimate.len() != steps * particles {
        return Err(ConsistencyError::EstimateCount {
            estimate_len: estimate.len(),
            steps,
            particles,
        });
    }

    let mut best = Vec::with_capacity(steps);
    for (t, w) in weights.iter().enumerate() {
        // Every weight NaN: fall back to the first particle.
        let p = argmax(w.values()).unwrap_or(0);
        best.push(estimate[t * particles + p].clone());
    }

    let mut log = Log::new(best);
    if let Some(src) = estimate.source() {
        log = log.with_source(src);
    }
    Ok(log)
}
