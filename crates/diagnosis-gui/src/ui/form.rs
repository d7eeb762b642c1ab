//! Title, the seven measurement sliders, and the predict button.

use diagnosis_core::features::{MeanFeature, MeanMeasurements};
use eframe::egui;

use crate::app::{DiagnosisApp, PredictState};
use crate::ui::theme;

const DESCRIPTION: &str = "This tool uses a machine learning model (Logistic Regression) to predict \
whether a breast mass is Benign or Malignant based on cell nuclei measurements.";

/// Sliders in the left column; the rest go right.
const LEFT_COLUMN: usize = 4;

pub fn draw_form(ui: &mut egui::Ui, app: &mut DiagnosisApp) {
    ui.heading("Breast Cancer Diagnostic Tool");
    ui.label(DESCRIPTION);
    ui.separator();

    ui.strong("Patient Data (Cell Nuclei Mean Values)");
    ui.add_space(4.0);

    let mut changed = false;
    ui.columns(2, |columns| {
        for (i, feature) in MeanFeature::ALL.into_iter().enumerate() {
            let column = if i < LEFT_COLUMN { 0 } else { 1 };
            changed |= input_slider(&mut columns[column], feature, &mut app.inputs);
        }
    });
    if changed {
        app.inputs_changed();
    }

    ui.add_space(4.0);
    if let Some(features) = &app.features {
        egui::CollapsingHeader::new("Model input")
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("features_grid")
                    .striped(true)
                    .spacing([12.0, 2.0])
                    .show(ui, |ui| {
                        for (name, value) in features.iter() {
                            ui.monospace(name);
                            ui.monospace(format!("{value:.3}"));
                            ui.end_row();
                        }
                    });
            });
    }

    ui.add_space(8.0);

    let idle = app.state == PredictState::Idle;
    ui.add_enabled_ui(idle, |ui| {
        let button = egui::Button::new(egui::RichText::new("Predict Diagnosis").strong())
            .fill(theme::COLOR_PRIMARY);
        if ui.add_sized([ui.available_width(), 32.0], button).clicked() {
            app.predict();
        }
    });
}

fn input_slider(ui: &mut egui::Ui, feature: MeanFeature, inputs: &mut MeanMeasurements) -> bool {
    let spec = feature.spec();
    let step = 10f64.powi(-(spec.decimals as i32));

    let response = ui.add(
        egui::Slider::new(inputs.get_mut(feature), spec.min..=spec.max)
            .text(spec.label)
            .step_by(step)
            .fixed_decimals(spec.decimals),
    );
    let response = match spec.help {
        Some(help) => response.on_hover_text(help),
        None => response,
    };
    response.changed()
}
