use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::color::ColorMap;
use crate::config::SessionConfig;
use crate::data::session::Session;

// ---------------------------------------------------------------------------
// Plot mode
// ---------------------------------------------------------------------------

/// How records are projected onto the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotMode {
    /// Component value against step index.
    TimeSeries { component: usize },
    /// One component against another, equal aspect.
    Planar { x: usize, y: usize },
}

impl Default for PlotMode {
    fn default() -> Self {
        PlotMode::TimeSeries { component: 0 }
    }
}

impl PlotMode {
    /// Project a record to a plot point. `None` when the record is too narrow.
    pub fn project(&self, step: usize, values: &[f64]) -> Option<[f64; 2]> {
        match *self {
            PlotMode::TimeSeries { component } => {
                values.get(component).map(|&v| [step as f64, v])
            }
            PlotMode::Planar { x, y } => Some([*values.get(x)?, *values.get(y)?]),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Run layout and base directory.
    pub config: SessionConfig,

    /// Loaded session (None until loading succeeds).
    pub session: Option<Session>,

    /// Names of runs whose estimate series is hidden.
    pub hidden: BTreeSet<String>,

    pub plot_mode: PlotMode,

    /// Estimate colours, keyed by run name.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl AppState {
    pub fn new(config: SessionConfig) -> Self {
        let color_map = ColorMap::new(&config.runs);
        Self {
            config,
            session: None,
            hidden: BTreeSet::new(),
            plot_mode: PlotMode::default(),
            color_map,
            status_message: None,
        }
    }

    /// Replace the configuration and reload.
    pub fn set_config(&mut self, config: SessionConfig) {
        self.color_map = ColorMap::new(&config.runs);
        self.config = config;
        self.reload();
    }

    /// Point the current configuration at another base directory and reload.
    pub fn set_base_dir(&mut self, base_dir: PathBuf) {
        self.config.base_dir = base_dir;
        self.reload();
    }

    /// Re-read every log of the current configuration.
    pub fn reload(&mut self) {
        match Session::load(&self.config) {
            Ok(session) => {
                self.clamp_plot_mode(session.max_arity());
                self.session = Some(session);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load session: {e:#}");
                self.session = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn is_visible(&self, run: &str) -> bool {
        !self.hidden.contains(run)
    }

    /// Show or hide a run's estimate series.
    pub fn toggle_run(&mut self, run: &str) {
        if !self.hidden.remove(run) {
            self.hidden.insert(run.to_string());
        }
    }

    /// Keep selected components inside the widest loaded record.
    fn clamp_plot_mode(&mut self, arity: usize) {
        let last = arity.saturating_sub(1);
        self.plot_mode = match self.plot_mode {
            PlotMode::TimeSeries { component } => PlotMode::TimeSeries {
                component: component.min(last),
            },
            PlotMode::Planar { x, y } => PlotMode::Planar {
                x: x.min(last),
                y: y.min(last),
            },
        };
    }
}
