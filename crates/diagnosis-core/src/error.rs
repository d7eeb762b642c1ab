//! Error types shared by the loader, the assembler and the invoker.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    /// Both the primary and the fallback directory failed to yield a
    /// complete scaler + classifier pair.
    #[error(
        "model artifacts unavailable: {} ({primary}); {} ({fallback})",
        primary_dir.display(),
        fallback_dir.display()
    )]
    ArtifactsUnavailable {
        primary_dir: PathBuf,
        fallback_dir: PathBuf,
        primary: Box<DiagnosisError>,
        fallback: Box<DiagnosisError>,
    },

    #[error("input '{name}' is not a finite number ({value})")]
    NonFiniteInput { name: &'static str, value: f64 },

    #[error("feature '{0}' is missing from the record")]
    MissingFeature(String),

    #[error("expected {expected} features, got {found}")]
    FeatureCountMismatch { expected: usize, found: usize },

    #[error("feature #{position} should be '{expected}', found '{found}'")]
    FeatureOrderMismatch {
        position: usize,
        expected: String,
        found: String,
    },
}

pub type Result<T, E = DiagnosisError> = std::result::Result<T, E>;
