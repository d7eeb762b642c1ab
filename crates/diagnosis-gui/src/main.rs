//! Breast Cancer Diagnostic Tool - eframe/egui desktop form.

mod app;
mod ui;

use anyhow::{anyhow, Result};
use diagnosis_core::artifacts::{ArtifactConfig, Artifacts};
use tracing::error;

use app::DiagnosisApp;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // No window without both artifacts.
    let artifacts = Artifacts::load(&ArtifactConfig::default()).map_err(|e| {
        error!(error = %e, "cannot start without model artifacts");
        e
    })?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Breast Cancer Diagnosis")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([560.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Breast Cancer Diagnosis",
        options,
        Box::new(move |cc| {
            ui::theme::apply_theme(&cc.egui_ctx);
            Ok(Box::new(DiagnosisApp::new(artifacts)))
        }),
    )
    .map_err(|e| anyhow!("window closed with an error: {e}"))
}
