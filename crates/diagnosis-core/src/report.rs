//! Human-readable verdicts and output formatting for a prediction.

use serde::Serialize;

use crate::features::FeatureRecord;
use crate::inference::{Diagnosis, PredictionResult};

impl Diagnosis {
    pub fn verdict(self) -> &'static str {
        match self {
            Diagnosis::Benign => "BENIGN",
            Diagnosis::Malignant => "MALIGNANT",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Diagnosis::Benign => "Prediction: BENIGN (Non-Cancerous)",
            Diagnosis::Malignant => "Prediction: MALIGNANT (Cancerous)",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Diagnosis::Benign => "Recommendation: Routine monitoring.",
            Diagnosis::Malignant => "Recommendation: Urgent pathological consultation required.",
        }
    }
}

/// `0.8734` -> `"87.3%"`
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisReport {
    #[serde(skip)]
    pub diagnosis: Diagnosis,
    pub verdict: &'static str,
    pub label: u8,
    pub malignant_probability: f64,
    pub confidence: f64,
    pub confidence_display: String,
    pub recommendation: &'static str,
    /// Pre-scaling values the prediction was made from.
    pub features: FeatureRecord,
}

impl DiagnosisReport {
    pub fn new(result: &PredictionResult, features: FeatureRecord) -> Self {
        let confidence = result.confidence();
        Self {
            diagnosis: result.diagnosis,
            verdict: result.diagnosis.verdict(),
            label: result.diagnosis.label(),
            malignant_probability: result.malignant_probability,
            confidence,
            confidence_display: format_confidence(confidence),
            recommendation: result.diagnosis.recommendation(),
            features,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("text") {
            Ok(OutputFormat::Text)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(OutputFormat::Json)
        } else {
            Err(format!("report format must be text or json, not '{s}'"))
        }
    }
}

pub fn render_report(report: &DiagnosisReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
    }
}

pub fn print_report(report: &DiagnosisReport, format: OutputFormat) {
    println!("{}", render_report(report, format));
}

fn render_text(report: &DiagnosisReport) -> String {
    let rule = "=".repeat(70);
    let mut out = String::new();

    out.push_str(&format!("{rule}\nDIAGNOSIS\n{rule}\n"));
    out.push_str("\nINPUT FEATURES:\n");
    for (name, value) in report.features.iter() {
        out.push_str(&format!("  {name:<26} {value:>10.3}\n"));
    }

    out.push_str(&format!("\n{}\n", report.diagnosis.headline()));
    out.push_str(&format!("Confidence: {}\n", report.confidence_display));
    out.push_str(&format!("{}\n", report.recommendation));
    out.push_str(&rule);
    out
}
