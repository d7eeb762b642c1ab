//! Startup loading of the fitted scaler and classifier.
//!
//! Both files are read from the primary directory; if anything goes wrong
//! there, both are read again from the fallback directory. There is no
//! third attempt and no mixing of files from the two directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::{DiagnosisError, Result};
use crate::features::FeatureRecord;
use crate::inference::{run_inference, Classifier, LogisticModel, PredictionResult, Scaler, StandardScaler};

pub const DEFAULT_PRIMARY_DIR: &str = ".";
pub const DEFAULT_FALLBACK_DIR: &str = "models";
pub const DEFAULT_MODEL_FILE: &str = "model.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Where to look for the artifacts. Relative paths resolve against the
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub primary_dir: PathBuf,
    pub fallback_dir: PathBuf,
    pub model_file: String,
    pub scaler_file: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            primary_dir: PathBuf::from(DEFAULT_PRIMARY_DIR),
            fallback_dir: PathBuf::from(DEFAULT_FALLBACK_DIR),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
        }
    }
}

/// The loaded scaler/classifier pair. Read-only after loading.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub scaler: StandardScaler,
    pub classifier: LogisticModel,
    /// Directory the pair was loaded from.
    pub source: PathBuf,
}

impl Artifacts {
    /// Load from the primary directory, falling back once to the secondary.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        let primary = match Self::load_from_dir(&config.primary_dir, config) {
            Ok(artifacts) => {
                info!(dir = %artifacts.source.display(), "loaded model artifacts");
                return Ok(artifacts);
            }
            Err(e) => e,
        };

        warn!(
            dir = %config.primary_dir.display(),
            error = %primary,
            "primary artifacts unavailable, trying fallback"
        );

        match Self::load_from_dir(&config.fallback_dir, config) {
            Ok(artifacts) => {
                info!(dir = %artifacts.source.display(), "loaded model artifacts from fallback");
                Ok(artifacts)
            }
            Err(fallback) => Err(DiagnosisError::ArtifactsUnavailable {
                primary_dir: config.primary_dir.clone(),
                fallback_dir: config.fallback_dir.clone(),
                primary: Box::new(primary),
                fallback: Box::new(fallback),
            }),
        }
    }

    /// Load both artifacts from `dir`, or neither.
    pub fn load_from_dir(dir: &Path, config: &ArtifactConfig) -> Result<Self> {
        let model_path = dir.join(&config.model_file);
        let scaler_path = dir.join(&config.scaler_file);

        let classifier: LogisticModel = read_json(&model_path)?;
        let scaler: StandardScaler = read_json(&scaler_path)?;

        if scaler.feature_names() != classifier.feature_names() {
            return Err(DiagnosisError::InvalidArtifact {
                path: model_path,
                reason: format!(
                    "classifier columns do not match the scaler in {}",
                    scaler_path.display()
                ),
            });
        }

        Ok(Self {
            scaler,
            classifier,
            source: dir.to_path_buf(),
        })
    }

    pub fn predict(&self, record: &FeatureRecord) -> Result<PredictionResult> {
        run_inference(&self.scaler, &self.classifier, record)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|source| DiagnosisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| DiagnosisError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
