//! Application state and prediction handling.

use diagnosis_core::artifacts::Artifacts;
use diagnosis_core::features::{assemble_features, FeatureRecord, MeanMeasurements};
use diagnosis_core::inference::PredictionResult;
use tracing::{debug, error};

/// Application state machine. `Predicting` only lasts for the synchronous
/// call triggered by the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictState {
    Idle,
    Predicting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Prediction(PredictionResult),
    Failed(String),
}

pub struct DiagnosisApp {
    artifacts: Artifacts,

    // Form
    pub inputs: MeanMeasurements,
    pub features: Option<FeatureRecord>,

    // State
    pub state: PredictState,
    pub outcome: Option<Outcome>,
}

impl DiagnosisApp {
    pub fn new(artifacts: Artifacts) -> Self {
        let mut app = Self {
            artifacts,
            inputs: MeanMeasurements::default(),
            features: None,
            state: PredictState::Idle,
            outcome: None,
        };
        app.inputs_changed();
        app
    }

    /// Rebuild the feature record and drop any verdict computed from the
    /// previous inputs.
    pub fn inputs_changed(&mut self) {
        self.outcome = None;
        self.features = match assemble_features(&self.inputs) {
            Ok(features) => Some(features),
            Err(e) => {
                error!(error = %e, "cannot assemble features");
                None
            }
        };
    }

    pub fn predict(&mut self) {
        self.state = PredictState::Predicting;

        let result = match &self.features {
            Some(features) => self.artifacts.predict(features).map_err(|e| e.to_string()),
            None => Err("no feature record for the current inputs".to_string()),
        };
        self.outcome = Some(match result {
            Ok(prediction) => {
                debug!(verdict = prediction.diagnosis.verdict(), "prediction shown");
                Outcome::Prediction(prediction)
            }
            Err(msg) => {
                error!(error = %msg, "prediction failed");
                Outcome::Failed(msg)
            }
        });

        self.state = PredictState::Idle;
    }
}

impl eframe::App for DiagnosisApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        eframe::egui::CentralPanel::default().show(ctx, |ui| {
            eframe::egui::ScrollArea::vertical().show(ui, |ui| {
                crate::ui::form::draw_form(ui, self);
                crate::ui::verdict::draw_verdict(ui, self);
            });
        });
    }
}
