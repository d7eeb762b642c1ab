//! Verdict panel: headline, confidence and recommendation.

use diagnosis_core::inference::Diagnosis;
use diagnosis_core::report::format_confidence;
use eframe::egui;

use crate::app::{DiagnosisApp, Outcome};
use crate::ui::theme;

pub fn draw_verdict(ui: &mut egui::Ui, app: &DiagnosisApp) {
    let Some(outcome) = &app.outcome else {
        return;
    };

    ui.add_space(8.0);
    ui.separator();

    match outcome {
        Outcome::Prediction(result) => {
            let color = match result.diagnosis {
                Diagnosis::Malignant => theme::COLOR_MALIGNANT,
                Diagnosis::Benign => theme::COLOR_BENIGN,
            };
            ui.colored_label(
                color,
                egui::RichText::new(result.diagnosis.headline()).strong().size(18.0),
            );
            ui.horizontal(|ui| {
                ui.label("Confidence:");
                ui.strong(format_confidence(result.confidence()));
            });
            ui.add_space(4.0);
            ui.colored_label(color, result.diagnosis.recommendation());
        }
        Outcome::Failed(msg) => {
            ui.colored_label(theme::COLOR_ERROR, format!("Prediction failed: {msg}"));
        }
    }
}
