//! Breast-mass diagnosis CLI - one prediction from seven mean measurements.
//!
//! Usage:
//!   diagnosis
//!   diagnosis --radius 17.9 --texture 10.4 --concave-points 0.147
//!   diagnosis --radius 12.1 --format json --primary-dir ./artifacts

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};

use diagnosis_core::artifacts::{ArtifactConfig, Artifacts, DEFAULT_FALLBACK_DIR, DEFAULT_PRIMARY_DIR};
use diagnosis_core::features::{assemble_features, MeanMeasurements};
use diagnosis_core::report::{print_report, DiagnosisReport, OutputFormat};

#[derive(Parser)]
#[command(name = "diagnosis")]
#[command(about = "Benign/malignant prediction from cell nuclei mean values")]
struct Cli {
    /// Mean of distances from center to points on the perimeter
    #[arg(long, default_value_t = MeanMeasurements::default().radius, value_parser = finite)]
    radius: f64,

    /// Standard deviation of gray-scale values
    #[arg(long, default_value_t = MeanMeasurements::default().texture, value_parser = finite)]
    texture: f64,

    /// Local variation in radius lengths
    #[arg(long, default_value_t = MeanMeasurements::default().smoothness, value_parser = finite)]
    smoothness: f64,

    /// Perimeter^2 / Area - 1.0
    #[arg(long, default_value_t = MeanMeasurements::default().compactness, value_parser = finite)]
    compactness: f64,

    /// Number of concave portions of the contour
    #[arg(long, default_value_t = MeanMeasurements::default().concave_points, value_parser = finite)]
    concave_points: f64,

    /// Symmetry
    #[arg(long, default_value_t = MeanMeasurements::default().symmetry, value_parser = finite)]
    symmetry: f64,

    /// Coastline approximation - 1
    #[arg(long, default_value_t = MeanMeasurements::default().fractal_dimension, value_parser = finite)]
    fractal_dimension: f64,

    /// Directory searched first for model.json and scaler.json
    #[arg(long, default_value = DEFAULT_PRIMARY_DIR)]
    primary_dir: PathBuf,

    /// Directory searched when the primary one fails
    #[arg(long, default_value = DEFAULT_FALLBACK_DIR)]
    fallback_dir: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Measurements must be real numbers; NaN would survive clamping.
fn finite(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{s}' is not a finite number"))
    }
}

impl Cli {
    fn measurements(&self) -> MeanMeasurements {
        MeanMeasurements {
            radius: self.radius,
            texture: self.texture,
            smoothness: self.smoothness,
            compactness: self.compactness,
            concave_points: self.concave_points,
            symmetry: self.symmetry,
            fractal_dimension: self.fractal_dimension,
        }
    }

    fn artifact_config(&self) -> ArtifactConfig {
        ArtifactConfig {
            primary_dir: self.primary_dir.clone(),
            fallback_dir: self.fallback_dir.clone(),
            ..ArtifactConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let artifacts = Artifacts::load(&cli.artifact_config()).context("cannot start without model artifacts")?;

    let inputs = cli.measurements();
    for feature in inputs.out_of_range() {
        let spec = feature.spec();
        warn!(
            input = spec.label,
            value = inputs.get(feature),
            min = spec.min,
            max = spec.max,
            "input outside slider range, clamping"
        );
    }
    let inputs = inputs.clamped();

    let features = assemble_features(&inputs)?;
    let result = artifacts.predict(&features).context("prediction failed")?;
    info!(verdict = result.diagnosis.verdict(), "prediction complete");

    print_report(&DiagnosisReport::new(&result, features), cli.format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_slider_defaults() {
        let cli = Cli::parse_from(["diagnosis"]);

        assert_eq!(cli.measurements(), MeanMeasurements::default());
        assert_eq!(cli.artifact_config(), ArtifactConfig::default());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn rejects_non_finite_measurements() {
        for value in ["NaN", "nan", "inf", "-infinity"] {
            let flag = format!("--radius={value}");
            let result = Cli::try_parse_from(["diagnosis", flag.as_str()]);
            assert!(result.is_err(), "{value} was accepted");
        }
        assert!(Cli::try_parse_from(["diagnosis", "--symmetry", "abc"]).is_err());
        assert!(Cli::try_parse_from(["diagnosis", "--symmetry", "0.2"]).is_ok());
    }

    #[test]
    fn out_of_range_measurements_are_clamped() {
        let cli = Cli::parse_from(["diagnosis", "--radius", "99", "--smoothness=-1"]);
        let inputs = cli.measurements();
        assert_eq!(inputs.out_of_range().len(), 2);

        let clamped = inputs.clamped();
        assert_eq!(clamped.radius, 28.11);
        assert_eq!(clamped.smoothness, 0.05);
    }

    #[test]
    fn flags_override_inputs_and_directories() {
        let cli = Cli::parse_from([
            "diagnosis",
            "--radius",
            "20.5",
            "--concave-points",
            "0.15",
            "--fallback-dir",
            "/opt/models",
            "--format",
            "json",
        ]);

        let inputs = cli.measurements();
        assert_eq!(inputs.radius, 20.5);
        assert_eq!(inputs.concave_points, 0.15);
        assert_eq!(inputs.texture, 19.29);
        assert_eq!(cli.artifact_config().fallback_dir, PathBuf::from("/opt/models"));
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
