use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TestConfiguration – where one harness wrote its logs
// ---------------------------------------------------------------------------

/// Log files of one test harness, relative to the session base directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConfiguration {
    /// Short label shown in the legend ("KF", "UKF", "SIS", ...).
    pub name: String,
    /// Sub-directory of the base directory holding the logs.
    pub directory: PathBuf,
    /// Ground-truth trajectory.
    pub target: PathBuf,
    /// Corrected estimate: one record per step, or P per step for particles.
    pub estimate: PathBuf,
    /// Particle weights, one vector per step. Only for particle filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<PathBuf>,
    /// sRGB triple in `[0, 1]` for the estimate series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 3]>,
}

impl TestConfiguration {
    pub fn target_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.directory).join(&self.target)
    }

    pub fn estimate_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.directory).join(&self.estimate)
    }

    pub fn weights_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.weights
            .as_ref()
            .map(|w| base_dir.join(&self.directory).join(w))
    }
}

// ---------------------------------------------------------------------------
// SessionConfig – the full set of runs to compare
// ---------------------------------------------------------------------------

/// Everything needed to build a comparison session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory containing one sub-directory per test configuration.
    pub base_dir: PathBuf,
    pub runs: Vec<TestConfiguration>,
    /// Names of the runs to overlay, in order. The first one supplies the
    /// reference target. `None` overlays every run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<Vec<String>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            base_dir: PathBuf::from("build"),
            runs: vec![
                TestConfiguration {
                    name: "KF".into(),
                    directory: "test_KF".into(),
                    target: "testKF_target.txt".into(),
                    estimate: "testKF_cor_mean.txt".into(),
                    weights: None,
                    color: None,
                },
                TestConfiguration {
                    name: "UKF".into(),
                    directory: "test_UKF_nonlinear".into(),
                    target: "testUKF_target.txt".into(),
                    estimate: "testUKF_cor_mean.txt".into(),
                    weights: None,
                    color: Some([0.7, 0.7, 0.7]),
                },
                TestConfiguration {
                    name: "SIS".into(),
                    directory: "test_SIS_nonlinear".into(),
                    target: "testSIS_target.txt".into(),
                    estimate: "testSIS_cor_particles.txt".into(),
                    weights: Some("testSIS_cor_weights.txt".into()),
                    color: Some([0.5, 0.5, 0.5]),
                },
            ],
            plot: Some(vec!["UKF".into(), "SIS".into()]),
        }
    }
}

impl SessionConfig {
    /// Load a JSON session file. A relative `base_dir` is resolved against
    /// the directory containing the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading session config {}", path.display()))?;
        let mut config: SessionConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing session config {}", path.display()))?;

        if config.base_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.base_dir = parent.join(&config.base_dir);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject duplicate run names and colour components outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (i, run) in self.runs.iter().enumerate() {
            if self.runs[..i].iter().any(|r| r.name == run.name) {
                bail!("duplicate run name '{}'", run.name);
            }
            if let Some(c) = run.color {
                if c.iter().any(|v| !(0.0..=1.0).contains(v)) {
                    bail!("run '{}': color components must lie in [0, 1]", run.name);
                }
            }
        }
        Ok(())
    }

    pub fn run(&self, name: &str) -> Option<&TestConfiguration> {
        self.runs.iter().find(|r| r.name == name)
    }

    /// Names of the runs to overlay, in plotting order.
    pub fn plotted_names(&self) -> Vec<String> {
        match &self.plot {
            Some(names) => names.clone(),
            None => self.runs.iter().map(|r| r.name.clone()).collect(),
        }
    }
}
