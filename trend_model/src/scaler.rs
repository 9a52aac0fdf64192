use serde::{Deserialize, Serialize};

use crate::error::PredictionError;

/// Fitted standard scaler: per-feature mean and scale in training order.
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Maps a raw row into the distribution the classifier was trained on.
    /// The row must have exactly the fitted width.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictionError> {
        if row.len() != self.mean.len() {
            return Err(PredictionError::ShapeMismatch {
                expected: self.mean.len(),
                actual: row.len(),
            });
        }

        row.iter()
            .enumerate()
            .map(|(i, &value)| {
                let scale = self.scale[i];
                if !scale.is_finite() || scale == 0.0 {
                    return Err(PredictionError::DegenerateScale { feature: i });
                }
                Ok((value - self.mean[i]) / scale)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> StandardScaler {
        StandardScaler {
            feature_names: vec!["a".into(), "b".into()],
            mean: vec![1.0, -2.0],
            scale: vec![2.0, 0.5],
        }
    }

    #[test]
    fn transform_centers_and_scales() {
        let scaled = scaler().transform(&[3.0, -1.0]).unwrap();
        assert_eq!(scaled, vec![1.0, 2.0]);
    }

    #[test]
    fn transform_rejects_wrong_width() {
        let err = scaler().transform(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::ShapeMismatch { expected: 2, actual: 3 }
        ));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let mut s = scaler();
        s.scale[1] = 0.0;
        let err = s.transform(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PredictionError::DegenerateScale { feature: 1 }));
    }
}
