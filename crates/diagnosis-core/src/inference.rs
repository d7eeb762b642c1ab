//! Scaling and classification of an assembled feature record.
//!
//! The fitted artifacts sit behind two traits so callers hand them in
//! explicitly; nothing here is global. The concrete implementations are a
//! per-feature standardizer and a binary logistic regression, both read from
//! JSON parameter files by [`crate::artifacts`].

use ndarray::Array1;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::features::FeatureRecord;

/// A fitted, order-sensitive feature transform.
pub trait Scaler {
    /// Column names seen at fit time.
    fn feature_names(&self) -> &[String];

    /// Normalize `record`. The record must carry exactly the fitted columns
    /// in fitted order.
    fn transform(&self, record: &FeatureRecord) -> Result<Array1<f64>>;
}

/// A fitted binary classifier over named columns.
pub trait Classifier {
    fn feature_names(&self) -> &[String];

    fn predict(&self, record: &FeatureRecord) -> Result<Diagnosis>;

    /// `[p(benign), p(malignant)]`
    fn predict_proba(&self, record: &FeatureRecord) -> Result<[f64; 2]>;
}

/// Class label: 0 = benign, 1 = malignant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    pub fn label(self) -> u8 {
        match self {
            Diagnosis::Benign => 0,
            Diagnosis::Malignant => 1,
        }
    }
}

/// Outcome of one prediction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub diagnosis: Diagnosis,
    pub malignant_probability: f64,
}

impl PredictionResult {
    /// Probability of the predicted class.
    pub fn confidence(&self) -> f64 {
        match self.diagnosis {
            Diagnosis::Malignant => self.malignant_probability,
            Diagnosis::Benign => 1.0 - self.malignant_probability,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScalerParams {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// `(x - mean) / scale`, per column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ScalerParams")]
pub struct StandardScaler {
    feature_names: Vec<String>,
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl TryFrom<ScalerParams> for StandardScaler {
    type Error = String;

    fn try_from(params: ScalerParams) -> std::result::Result<Self, String> {
        let n = params.feature_names.len();
        if n == 0 {
            return Err("scaler has no features".into());
        }
        if params.mean.len() != n || params.scale.len() != n {
            return Err(format!(
                "scaler has {n} feature names but {} means and {} scales",
                params.mean.len(),
                params.scale.len()
            ));
        }
        if params.mean.iter().chain(&params.scale).any(|v| !v.is_finite()) {
            return Err("scaler parameters must be finite".into());
        }
        // Constant columns were fitted with a zero scale; leave them unscaled.
        let scale = params
            .scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Vec<_>>();

        Ok(Self {
            feature_names: params.feature_names,
            mean: Array1::from(params.mean),
            scale: Array1::from(scale),
        })
    }
}

impl Scaler for StandardScaler {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn transform(&self, record: &FeatureRecord) -> Result<Array1<f64>> {
        record.check_schema(self.feature_names.as_slice())?;
        Ok((record.values() - &self.mean) / &self.scale)
    }
}

#[derive(Debug, Deserialize)]
struct LogisticParams {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
    classes: Vec<i64>,
}

/// Binary logistic regression: `p(malignant) = sigmoid(coef . x + intercept)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "LogisticParams")]
pub struct LogisticModel {
    feature_names: Vec<String>,
    coefficients: Array1<f64>,
    intercept: f64,
}

impl TryFrom<LogisticParams> for LogisticModel {
    type Error = String;

    fn try_from(params: LogisticParams) -> std::result::Result<Self, String> {
        let n = params.feature_names.len();
        if n == 0 {
            return Err("classifier has no features".into());
        }
        if params.coefficients.len() != n {
            return Err(format!(
                "classifier has {n} feature names but {} coefficients",
                params.coefficients.len()
            ));
        }
        if params.classes != [0, 1] {
            return Err(format!(
                "classifier classes must be [0, 1], got {:?}",
                params.classes
            ));
        }
        if !params.intercept.is_finite() || params.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("classifier parameters must be finite".into());
        }

        Ok(Self {
            feature_names: params.feature_names,
            coefficients: Array1::from(params.coefficients),
            intercept: params.intercept,
        })
    }
}

impl LogisticModel {
    /// Signed distance from the decision boundary; positive means malignant.
    pub fn decision_function(&self, record: &FeatureRecord) -> Result<f64> {
        record.check_schema(self.feature_names.as_slice())?;
        Ok(self.coefficients.dot(record.values()) + self.intercept)
    }
}

impl Classifier for LogisticModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, record: &FeatureRecord) -> Result<Diagnosis> {
        let z = self.decision_function(record)?;
        Ok(if z > 0.0 {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        })
    }

    fn predict_proba(&self, record: &FeatureRecord) -> Result<[f64; 2]> {
        let p = sigmoid(self.decision_function(record)?);
        Ok([1.0 - p, p])
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Scale `record`, put the column names back on the scaled vector, and
/// classify it.
pub fn run_inference<S, C>(scaler: &S, classifier: &C, record: &FeatureRecord) -> Result<PredictionResult>
where
    S: Scaler + ?Sized,
    C: Classifier + ?Sized,
{
    let scaled = scaler.transform(record)?;
    let scaled = FeatureRecord::from_parts(scaler.feature_names().to_vec(), scaled)?;

    let diagnosis = classifier.predict(&scaled)?;
    let [_, malignant_probability] = classifier.predict_proba(&scaled)?;

    debug!(?diagnosis, malignant_probability, "inference complete");

    Ok(PredictionResult {
        diagnosis,
        malignant_probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosisError;
    use crate::features::{assemble_features, MeanMeasurements, FEATURE_SCHEMA};

    fn schema() -> Vec<String> {
        FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect()
    }

    fn scaler() -> StandardScaler {
        serde_json::from_value(serde_json::json!({
            "feature_names": FEATURE_SCHEMA,
            "mean": vec![0.0; 21],
            "scale": vec![1.0; 21],
        }))
        .unwrap()
    }

    /// Weight only on radius_mean: malignant once radius exceeds `threshold`.
    fn radius_model(threshold: f64) -> LogisticModel {
        let mut coefficients = vec![0.0; 21];
        coefficients[0] = 1.0;
        serde_json::from_value(serde_json::json!({
            "feature_names": FEATURE_SCHEMA,
            "coefficients": coefficients,
            "intercept": -threshold,
            "classes": [0, 1],
        }))
        .unwrap()
    }

    fn record_with_radius(radius: f64) -> FeatureRecord {
        assemble_features(&MeanMeasurements {
            radius,
            ..MeanMeasurements::default()
        })
        .unwrap()
    }

    #[test]
    fn standard_scaler_normalizes_each_column() {
        let scaler: StandardScaler = serde_json::from_value(serde_json::json!({
            "feature_names": ["a", "b", "c"],
            "mean": [1.0, 10.0, 5.0],
            "scale": [2.0, 5.0, 0.0],
        }))
        .unwrap();
        let record = FeatureRecord::from_pairs([("a", 3.0), ("b", 0.0), ("c", 7.0)]);

        let scaled = scaler.transform(&record).unwrap();
        assert_eq!(scaled.to_vec(), vec![1.0, -2.0, 2.0]);
    }

    #[test]
    fn transform_rejects_reordered_record() {
        let record = FeatureRecord::from_pairs(
            FEATURE_SCHEMA.iter().rev().map(|name| (*name, 1.0)),
        );
        let err = scaler().transform(&record).unwrap_err();

        assert!(matches!(err, DiagnosisError::FeatureOrderMismatch { position: 0, .. }));
    }

    #[test]
    fn transform_rejects_short_record() {
        let record = FeatureRecord::from_pairs(FEATURE_SCHEMA[..20].iter().map(|n| (*n, 1.0)));
        let err = scaler().transform(&record).unwrap_err();

        assert!(matches!(
            err,
            DiagnosisError::FeatureCountMismatch { expected: 21, found: 20 }
        ));
    }

    #[test]
    fn scaler_params_must_agree_in_length() {
        let result: std::result::Result<StandardScaler, _> =
            serde_json::from_value(serde_json::json!({
                "feature_names": ["a", "b"],
                "mean": [0.0],
                "scale": [1.0, 1.0],
            }));
        assert!(result.unwrap_err().to_string().contains("1 means"));
    }

    #[test]
    fn classifier_rejects_non_binary_classes() {
        let result: std::result::Result<LogisticModel, _> =
            serde_json::from_value(serde_json::json!({
                "feature_names": ["a"],
                "coefficients": [1.0],
                "intercept": 0.0,
                "classes": [0, 1, 2],
            }));
        assert!(result.is_err());
    }

    #[test]
    fn logistic_probability_matches_sigmoid() {
        let model = radius_model(14.0);
        let record = record_with_radius(16.0);

        let [benign, malignant] = model.predict_proba(&record).unwrap();
        let expected = 1.0 / (1.0 + (-2.0f64).exp());
        assert!((malignant - expected).abs() < 1e-12);
        assert!((benign + malignant - 1.0).abs() < 1e-12);
        assert_eq!(model.predict(&record).unwrap(), Diagnosis::Malignant);
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn malignant_confidence_is_malignant_probability() {
        let result = run_inference(&scaler(), &radius_model(14.0), &record_with_radius(20.0)).unwrap();

        assert_eq!(result.diagnosis, Diagnosis::Malignant);
        assert_eq!(result.confidence(), result.malignant_probability);
        assert!(result.confidence() > 0.5 && result.confidence() <= 1.0);
    }

    #[test]
    fn benign_confidence_is_complement() {
        let result = run_inference(&scaler(), &radius_model(14.0), &record_with_radius(8.0)).unwrap();

        assert_eq!(result.diagnosis, Diagnosis::Benign);
        assert_eq!(result.confidence(), 1.0 - result.malignant_probability);
        assert!((0.0..=1.0).contains(&result.confidence()));
        assert!(result.malignant_probability < 0.5);
    }

    #[test]
    fn inference_is_idempotent() {
        let scaler = scaler();
        let model = radius_model(14.0);
        let record = assemble_features(&MeanMeasurements::default()).unwrap();

        let first = run_inference(&scaler, &model, &record).unwrap();
        let second = run_inference(&scaler, &model, &record).unwrap();
        assert_eq!(first, second);
    }

    struct NameRecorder {
        names: Vec<String>,
        seen: std::cell::RefCell<Vec<String>>,
    }

    impl Classifier for NameRecorder {
        fn feature_names(&self) -> &[String] {
            &self.names
        }

        fn predict(&self, record: &FeatureRecord) -> Result<Diagnosis> {
            *self.seen.borrow_mut() = record.names().to_vec();
            Ok(Diagnosis::Benign)
        }

        fn predict_proba(&self, _record: &FeatureRecord) -> Result<[f64; 2]> {
            Ok([0.75, 0.25])
        }
    }

    #[test]
    fn classifier_receives_named_scaled_columns() {
        let classifier = NameRecorder {
            names: schema(),
            seen: Default::default(),
        };
        let record = assemble_features(&MeanMeasurements::default()).unwrap();

        let result = run_inference(&scaler(), &classifier, &record).unwrap();
        assert_eq!(*classifier.seen.borrow(), schema());
        assert_eq!(result.confidence(), 0.75);
    }

    #[test]
    fn schema_error_propagates_from_classifier() {
        let mut names = schema();
        names.swap(0, 1);
        let model: LogisticModel = serde_json::from_value(serde_json::json!({
            "feature_names": names,
            "coefficients": vec![0.0; 21],
            "intercept": 0.0,
            "classes": [0, 1],
        }))
        .unwrap();
        let record = assemble_features(&MeanMeasurements::default()).unwrap();

        let err = run_inference(&scaler(), &model, &record).unwrap_err();
        assert!(matches!(err, DiagnosisError::FeatureOrderMismatch { .. }));
    }
}
