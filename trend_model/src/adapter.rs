use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifacts::ModelArtifacts;
use crate::classifier::RandomForestClassifier;
use crate::error::PredictionError;
use crate::scaler::StandardScaler;
use crate::schema::FeatureRow;

/// Next-period directional prediction: class 1 is "Up", class 0 is "Down".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "Up"),
            Trend::Down => write!(f, "Down"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub trend: Trend,
    pub p_down: f64,
    pub p_up: f64,
}

/// Stateless request/response adapter: assemble the ordered row, scale it,
/// classify it, map the label. Holds the artifacts by value; callers share it
/// behind an `Arc` since nothing here ever mutates.
pub struct InferenceAdapter {
    scaler: StandardScaler,
    classifier: RandomForestClassifier,
}

impl InferenceAdapter {
    pub fn new(scaler: StandardScaler, classifier: RandomForestClassifier) -> Self {
        Self { scaler, classifier }
    }

    pub fn from_artifacts(artifacts: ModelArtifacts) -> Self {
        Self::new(artifacts.scaler, artifacts.classifier)
    }

    /// Ranges are the collector's responsibility and are not re-checked here;
    /// structural failures (artifact fitted on a different width, malformed
    /// trees) still surface as `PredictionError`.
    pub fn predict(&self, row: &FeatureRow) -> Result<Prediction, PredictionError> {
        let raw = row.to_array();
        let scaled = self.scaler.transform(&raw)?;

        let label = self.classifier.predict(&scaled)?;
        let probabilities = self.classifier.predict_proba(&scaled)?;
        let (p_down, p_up) = match probabilities.as_slice() {
            [p_down, p_up] => (*p_down, *p_up),
            _ => {
                return Err(PredictionError::MalformedTree {
                    reason: "expected exactly two class probabilities",
                });
            }
        };

        let trend = if label == 1 { Trend::Up } else { Trend::Down };
        Ok(Prediction { trend, p_down, p_up })
    }
}
