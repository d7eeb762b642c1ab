//! Feature assembly - builds the 21-column record the scaler was fitted on.
//!
//! Layout of a record (training order, not alphabetical):
//! - 7 "mean" statistics, taken from the form inputs
//! - 7 "standard error" statistics, fixed constants
//! - 7 "worst" statistics, fixed constants
//!
//! perimeter_*, area_* and concavity_* were dropped before training and never
//! appear here. Note the space in `concave points_*`.

use ndarray::Array1;
use serde::ser::{Serialize, Serializer};

use crate::error::{DiagnosisError, Result};

pub const NUM_FEATURES: usize = 21;

/// Column order used at training time. The scaler works positionally, so
/// every record handed to it must follow this order exactly.
pub const FEATURE_SCHEMA: [&str; NUM_FEATURES] = [
    "radius_mean",
    "texture_mean",
    "smoothness_mean",
    "compactness_mean",
    "concave points_mean",
    "symmetry_mean",
    "fractal_dimension_mean",
    "radius_se",
    "texture_se",
    "smoothness_se",
    "compactness_se",
    "concave points_se",
    "symmetry_se",
    "fractal_dimension_se",
    "radius_worst",
    "texture_worst",
    "smoothness_worst",
    "compactness_worst",
    "concave points_worst",
    "symmetry_worst",
    "fractal_dimension_worst",
];

/// SE and worst statistics the form does not collect.
pub const FIXED_FEATURES: [(&str, f64); 14] = [
    ("radius_se", 0.405),
    ("texture_se", 1.216),
    ("smoothness_se", 0.007),
    ("compactness_se", 0.025),
    ("concave points_se", 0.011),
    ("symmetry_se", 0.020),
    ("fractal_dimension_se", 0.003),
    ("radius_worst", 16.269),
    ("texture_worst", 25.677),
    ("smoothness_worst", 0.132),
    ("compactness_worst", 0.254),
    ("concave points_worst", 0.114),
    ("symmetry_worst", 0.290),
    ("fractal_dimension_worst", 0.083),
];

/// Range, default and display precision of one form input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSpec {
    pub label: &'static str,
    pub key: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub decimals: usize,
    pub help: Option<&'static str>,
}

impl InputSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// The seven "mean" measurements collected by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeanFeature {
    Radius,
    Texture,
    Smoothness,
    Compactness,
    ConcavePoints,
    Symmetry,
    FractalDimension,
}

impl MeanFeature {
    pub const ALL: [MeanFeature; 7] = [
        MeanFeature::Radius,
        MeanFeature::Texture,
        MeanFeature::Smoothness,
        MeanFeature::Compactness,
        MeanFeature::ConcavePoints,
        MeanFeature::Symmetry,
        MeanFeature::FractalDimension,
    ];

    pub fn spec(self) -> InputSpec {
        match self {
            MeanFeature::Radius => InputSpec {
                label: "Radius",
                key: "radius_mean",
                min: 6.98,
                max: 28.11,
                default: 14.12,
                decimals: 2,
                help: Some("Mean of distances from center to points on the perimeter"),
            },
            MeanFeature::Texture => InputSpec {
                label: "Texture",
                key: "texture_mean",
                min: 9.71,
                max: 39.28,
                default: 19.29,
                decimals: 2,
                help: Some("Standard deviation of gray-scale values"),
            },
            MeanFeature::Smoothness => InputSpec {
                label: "Smoothness",
                key: "smoothness_mean",
                min: 0.05,
                max: 0.16,
                default: 0.096,
                decimals: 3,
                help: Some("Local variation in radius lengths"),
            },
            MeanFeature::Compactness => InputSpec {
                label: "Compactness",
                key: "compactness_mean",
                min: 0.02,
                max: 0.35,
                default: 0.104,
                decimals: 3,
                help: Some("Perimeter^2 / Area - 1.0"),
            },
            MeanFeature::ConcavePoints => InputSpec {
                label: "Concave Points",
                key: "concave points_mean",
                min: 0.00,
                max: 0.20,
                default: 0.049,
                decimals: 3,
                help: Some("Number of concave portions of the contour"),
            },
            MeanFeature::Symmetry => InputSpec {
                label: "Symmetry",
                key: "symmetry_mean",
                min: 0.10,
                max: 0.30,
                default: 0.181,
                decimals: 3,
                help: None,
            },
            MeanFeature::FractalDimension => InputSpec {
                label: "Fractal Dimension",
                key: "fractal_dimension_mean",
                min: 0.05,
                max: 0.10,
                default: 0.062,
                decimals: 3,
                help: Some("Coastline approximation - 1"),
            },
        }
    }
}

/// Form values. `Default` gives the slider defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanMeasurements {
    pub radius: f64,
    pub texture: f64,
    pub smoothness: f64,
    pub compactness: f64,
    pub concave_points: f64,
    pub symmetry: f64,
    pub fractal_dimension: f64,
}

impl Default for MeanMeasurements {
    fn default() -> Self {
        Self {
            radius: MeanFeature::Radius.spec().default,
            texture: MeanFeature::Texture.spec().default,
            smoothness: MeanFeature::Smoothness.spec().default,
            compactness: MeanFeature::Compactness.spec().default,
            concave_points: MeanFeature::ConcavePoints.spec().default,
            symmetry: MeanFeature::Symmetry.spec().default,
            fractal_dimension: MeanFeature::FractalDimension.spec().default,
        }
    }
}

impl MeanMeasurements {
    pub fn get(&self, feature: MeanFeature) -> f64 {
        match feature {
            MeanFeature::Radius => self.radius,
            MeanFeature::Texture => self.texture,
            MeanFeature::Smoothness => self.smoothness,
            MeanFeature::Compactness => self.compactness,
            MeanFeature::ConcavePoints => self.concave_points,
            MeanFeature::Symmetry => self.symmetry,
            MeanFeature::FractalDimension => self.fractal_dimension,
        }
    }

    pub fn get_mut(&mut self, feature: MeanFeature) -> &mut f64 {
        match feature {
            MeanFeature::Radius => &mut self.radius,
            MeanFeature::Texture => &mut self.texture,
            MeanFeature::Smoothness => &mut self.smoothness,
            MeanFeature::Compactness => &mut self.compactness,
            MeanFeature::ConcavePoints => &mut self.concave_points,
            MeanFeature::Symmetry => &mut self.symmetry,
            MeanFeature::FractalDimension => &mut self.fractal_dimension,
        }
    }

    /// Inputs that fall outside their slider range.
    pub fn out_of_range(&self) -> Vec<MeanFeature> {
        MeanFeature::ALL
            .into_iter()
            .filter(|&f| !f.spec().contains(self.get(f)))
            .collect()
    }

    /// Pull every input back into its slider range. NaN has no place in a
    /// range and is left as is; [`assemble_features`] rejects it.
    pub fn clamped(mut self) -> Self {
        for feature in MeanFeature::ALL {
            let value = self.get_mut(feature);
            *value = feature.spec().clamp(*value);
        }
        self
    }
}

/// Named, ordered feature values. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    names: Vec<String>,
    values: Array1<f64>,
}

impl FeatureRecord {
    /// Build a record from `(name, value)` pairs, keeping their order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<f64>) =
            pairs.into_iter().map(|(n, v)| (n.into(), v)).unzip();
        Self {
            names,
            values: Array1::from(values),
        }
    }

    /// Attach `names` to a bare vector, e.g. the scaler's output.
    pub fn from_parts(names: Vec<String>, values: Array1<f64>) -> Result<Self> {
        if names.len() != values.len() {
            return Err(DiagnosisError::FeatureCountMismatch {
                expected: names.len(),
                found: values.len(),
            });
        }
        Ok(Self { names, values })
    }

    /// Select columns by name into `order`. Extra columns are dropped.
    pub fn reorder(&self, order: &[&str]) -> Result<Self> {
        let mut names = Vec::with_capacity(order.len());
        let mut values = Vec::with_capacity(order.len());
        for &name in order {
            let value = self
                .get(name)
                .ok_or_else(|| DiagnosisError::MissingFeature(name.to_string()))?;
            names.push(name.to_string());
            values.push(value);
        }
        Ok(Self {
            names,
            values: Array1::from(values),
        })
    }

    /// Fail unless the record's columns are exactly `expected`, in order.
    pub fn check_schema<S: AsRef<str>>(&self, expected: &[S]) -> Result<()> {
        if self.names.len() != expected.len() {
            return Err(DiagnosisError::FeatureCountMismatch {
                expected: expected.len(),
                found: self.names.len(),
            });
        }
        for (position, (found, expected)) in self.names.iter().zip(expected).enumerate() {
            if found.as_str() != expected.as_ref() {
                return Err(DiagnosisError::FeatureOrderMismatch {
                    position,
                    expected: expected.as_ref().to_string(),
                    found: found.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

// Serialized as a JSON object in column order.
impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Merge the seven form inputs with the fixed SE/worst constants and put
/// the result in training order.
pub fn assemble_features(inputs: &MeanMeasurements) -> Result<FeatureRecord> {
    if let Some(feature) = MeanFeature::ALL
        .into_iter()
        .find(|&f| !inputs.get(f).is_finite())
    {
        return Err(DiagnosisError::NonFiniteInput {
            name: feature.spec().key,
            value: inputs.get(feature),
        });
    }

    let means = MeanFeature::ALL
        .into_iter()
        .map(|f| (f.spec().key, inputs.get(f)));
    let record = FeatureRecord::from_pairs(means.chain(FIXED_FEATURES));
    record.reorder(&FEATURE_SCHEMA)
}
