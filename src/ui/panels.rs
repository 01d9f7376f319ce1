use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::TARGET_COLOR;
use crate::config::SessionConfig;
use crate::data::reconcile::{Estimate, ReconciledRun};
use crate::state::{AppState, PlotMode};

// ---------------------------------------------------------------------------
// Left side panel – runs and plot mode
// ---------------------------------------------------------------------------

/// Render the left panel: one row per run plus the projection controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Runs");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No session loaded.");
        return;
    };

    let arity = session.max_arity();
    let rows: Vec<(String, String)> = session
        .runs()
        .iter()
        .map(|r| (r.name.clone(), describe_run(r)))
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new("●").color(TARGET_COLOR));
                ui.strong("target");
            });

            for (name, shape) in &rows {
                ui.horizontal(|ui: &mut Ui| {
                    let mut visible = state.is_visible(name);
                    let swatch = RichText::new("●").color(state.color_map.color_for(name));
                    ui.label(swatch);
                    if ui.checkbox(&mut visible, RichText::new(name).strong()).changed() {
                        state.toggle_run(name);
                    }
                });
                ui.label(RichText::new(shape).small());
            }

            ui.separator();
            plot_mode_selector(ui, state, arity);
        });
}

fn describe_run(run: &ReconciledRun) -> String {
    match &run.estimate {
        Estimate::Point(_) => "point estimate".to_string(),
        Estimate::BestParticle { particles, .. } => format!("best of {particles} particles"),
        Estimate::Irreconcilable {
            target_len,
            estimate_len,
        } => format!("irreconcilable: target {target_len} / estimate {estimate_len}"),
    }
}

fn plot_mode_selector(ui: &mut Ui, state: &mut AppState, arity: usize) {
    ui.strong("Plot");

    let mut planar = matches!(state.plot_mode, PlotMode::Planar { .. });
    ui.horizontal(|ui: &mut Ui| {
        if ui.radio(!planar, "vs step").clicked() {
            planar = false;
        }
        if ui.radio(planar, "x / y").clicked() {
            planar = true;
        }
    });

    state.plot_mode = match (state.plot_mode, planar) {
        (PlotMode::TimeSeries { component }, false) => {
            PlotMode::TimeSeries {
                component: component_combo(ui, "component", component, arity),
            }
        }
        (PlotMode::Planar { x, y }, true) => PlotMode::Planar {
            x: component_combo(ui, "x", x, arity),
            y: component_combo(ui, "y", y, arity),
        },
        (PlotMode::TimeSeries { component }, true) => PlotMode::Planar {
            x: component,
            y: (component + 1).min(arity.saturating_sub(1)),
        },
        (PlotMode::Planar { x, .. }, false) => PlotMode::TimeSeries { component: x },
    };
}

fn component_combo(ui: &mut Ui, label: &str, mut selected: usize, arity: usize) -> usize {
    egui::ComboBox::from_label(label)
        .selected_text(selected.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for i in 0..arity.max(1) {
                ui.selectable_value(&mut selected, i, i.to_string());
            }
        });
    selected
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open config…").clicked() {
                open_config_dialog(state);
                ui.close_menu();
            }
            if ui.button("Choose base directory…").clicked() {
                pick_base_dir(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(state.config.base_dir.display().to_string());

        if let Some(session) = &state.session {
            ui.separator();
            ui.label(format!(
                "{} runs, {} steps",
                session.runs().len(),
                session.steps()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_config_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open session config")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match SessionConfig::from_file(&path) {
            Ok(config) => {
                log::info!(
                    "Loaded config {} with runs {:?}",
                    path.display(),
                    config.plotted_names()
                );
                state.set_config(config);
            }
            Err(e) => {
                log::error!("Failed to load config: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn pick_base_dir(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Choose log base directory")
        .set_directory(&state.config.base_dir)
        .pick_folder();

    if let Some(dir) = dir {
        log::info!("Base directory set to {}", dir.display());
        state.set_base_dir(dir);
    }
}
