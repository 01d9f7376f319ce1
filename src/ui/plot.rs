use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, PlotUi, Points};

use crate::color::TARGET_COLOR;
use crate::data::model::Log;
use crate::state::{AppState, PlotMode};

// ---------------------------------------------------------------------------
// Trajectory plot (central panel)
// ---------------------------------------------------------------------------

/// Render the shared target and every visible estimate in the central panel.
pub fn trajectory_plot(ui: &mut Ui, state: &AppState) {
    let session = match &state.session {
        Some(s) => s,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No session loaded  (File → Open config… or Choose base directory…)");
            });
            return;
        }
    };

    let mode = state.plot_mode;
    let (x_label, y_label) = match mode {
        PlotMode::TimeSeries { component } => ("step".to_string(), format!("x[{component}]")),
        PlotMode::Planar { x, y } => (format!("x[{x}]"), format!("x[{y}]")),
    };

    let mut plot = Plot::new("trajectory_plot")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if matches!(mode, PlotMode::Planar { .. }) {
        plot = plot.data_aspect(1.0);
    }

    plot.show(ui, |plot_ui| {
        series(
            plot_ui,
            "target",
            session.target(),
            mode,
            TARGET_COLOR,
            MarkerShape::Circle,
        );

        for run in session.runs() {
            if !state.is_visible(&run.name) {
                continue;
            }
            // Irreconcilable runs have nothing to draw.
            let Some(estimate) = run.estimate() else {
                continue;
            };
            series(
                plot_ui,
                &run.name,
                estimate,
                mode,
                state.color_map.color_for(&run.name),
                MarkerShape::Cross,
            );
        }
    });
}

/// Draw one log as a line with markers at every record.
fn series(
    plot_ui: &mut PlotUi,
    name: &str,
    log: &Log,
    mode: PlotMode,
    color: Color32,
    marker: MarkerShape,
) {
    let points = series_points(log, mode);

    plot_ui.line(
        Line::new(PlotPoints::from(points.clone()))
            .name(name)
            .color(color)
            .width(1.5),
    );
    plot_ui.points(
        Points::new(PlotPoints::from(points))
            .name(name)
            .color(color)
            .shape(marker)
            .radius(3.0),
    );
}

/// Project every record of `log`; records too narrow for `mode` are dropped.
pub fn series_points(log: &Log, mode: PlotMode) -> Vec<[f64; 2]> {
    log.iter()
        .enumerate()
        .filter_map(|(step, r)| mode.project(step, r.values()))
        .collect()
}
