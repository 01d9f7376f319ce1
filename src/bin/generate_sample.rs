use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use trajview::config::SessionConfig;
use trajview::data::model::Record;

const STEPS: usize = 100;
const PARTICLES: usize = 50;
const SAMPLING_TIME: f64 = 1.0;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

// ---------------------------------------------------------------------------
// Target models
// ---------------------------------------------------------------------------

/// Noise-free step of the scalar benchmark: x/2 + 25x/(1+x²).
fn propagate(x: f64) -> f64 {
    0.5 * x + 25.0 * x / (1.0 + x * x)
}

/// Scalar benchmark target, unit process noise.
fn nonlinear_scalar_target(rng: &mut SimpleRng) -> Vec<Record> {
    let mut x = 0.1;
    (0..STEPS)
        .map(|_| {
            x = propagate(x) + rng.gauss(0.0, 1.0);
            Record::new(vec![x])
        })
        .collect()
}

/// White-noise-acceleration target, state [x, vx, y, vy].
fn wna_target(rng: &mut SimpleRng) -> Vec<Record> {
    let mut s = [10.0, 1.0, 0.0, 1.0];
    (0..STEPS)
        .map(|_| {
            s[0] += SAMPLING_TIME * s[1];
            s[2] += SAMPLING_TIME * s[3];
            s[1] += rng.gauss(0.0, 0.1);
            s[3] += rng.gauss(0.0, 0.1);
            Record::new(s.to_vec())
        })
        .collect()
}

fn perturb(target: &[Record], sigma: f64, rng: &mut SimpleRng) -> Vec<Record> {
    target
        .iter()
        .map(|r| Record::new(r.values().iter().map(|&v| rng.gauss(v, sigma)).collect()))
        .collect()
}

/// P particles per step around the target, weighted by a Gaussian likelihood
/// of a noisy measurement.
fn particles(target: &[Record], rng: &mut SimpleRng) -> (Vec<Record>, Vec<Record>) {
    let mut cloud = Vec::with_capacity(target.len() * PARTICLES);
    let mut weights = Vec::with_capacity(target.len());

    for r in target {
        let truth = r.values()[0];
        let measurement = rng.gauss(truth, 1.0);
        let mut w = Vec::with_capacity(PARTICLES);
        for _ in 0..PARTICLES {
            let p = rng.gauss(truth, 2.0);
            w.push((-0.5 * (p - measurement).powi(2)).exp());
            cloud.push(Record::new(vec![p]));
        }
        let total: f64 = w.iter().sum();
        if total > 0.0 {
            w.iter_mut().for_each(|v| *v /= total);
        }
        weights.push(Record::new(w));
    }
    (cloud, weights)
}

fn write_log(path: &Path, records: &[Record]) -> Result<()> {
    let mut text = String::new();
    for r in records {
        writeln!(text, "{r}").context("formatting record")?;
    }
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let base_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| SessionConfig::default().base_dir);
    let config = SessionConfig::default();
    let mut rng = SimpleRng::new(42);

    let linear = wna_target(&mut rng);
    let nonlinear = nonlinear_scalar_target(&mut rng);

    for run in &config.runs {
        let dir = base_dir.join(&run.directory);
        std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

        let target = if run.name == "KF" { &linear } else { &nonlinear };
        write_log(&run.target_path(&base_dir), target)?;

        match run.weights_path(&base_dir) {
            Some(weights_path) => {
                let (cloud, weights) = particles(target, &mut rng);
                write_log(&run.estimate_path(&base_dir), &cloud)?;
                write_log(&weights_path, &weights)?;
            }
            None => {
                let estimate = perturb(target, 0.5, &mut rng);
                write_log(&run.estimate_path(&base_dir), &estimate)?;
            }
        }
        println!("Wrote run {} to {}", run.name, dir.display());
    }

    println!(
        "{} steps, {} particles for particle runs, under {}",
        STEPS,
        PARTICLES,
        base_dir.display()
    );
    Ok(())
}
