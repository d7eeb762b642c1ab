//! diagnosis-core - shared library for the breast-mass diagnosis form.
//!
//! Provides artifact loading, feature assembly, scaler + classifier
//! inference, and result reporting used by both the CLI and GUI frontends.

pub mod artifacts;
pub mod error;
pub mod features;
pub mod inference;
pub mod report;

