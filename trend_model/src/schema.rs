use serde::{Deserialize, Serialize};

use crate::error::InputError;

pub const NUM_FEATURES: usize = 15;

/// One column of the training-time schema: canonical name, UI hints and the
/// accepted range.
#[derive(Debug, Clone, Copy)]
pub struct FeatureField {
    pub name: &'static str,
    pub help: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    /// Only 0 or 1 accepted, regardless of min/max.
    pub binary: bool,
}

/// The fixed feature order the scaler and classifier were fitted on. Rows are
/// always assembled from this table, never from positional literals, so a
/// reordering here is the only way to misorder a row.
pub const FEATURE_SCHEMA: [FeatureField; NUM_FEATURES] = [
    FeatureField { name: "Open", help: "Normalized Open price", min: -10.0, max: 10.0, step: 0.01, default: 0.5, binary: false },
    FeatureField { name: "High", help: "Normalized High price", min: -10.0, max: 10.0, step: 0.01, default: 0.6, binary: false },
    FeatureField { name: "Low", help: "Normalized Low price", min: -10.0, max: 10.0, step: 0.01, default: 0.4, binary: false },
    FeatureField { name: "Close", help: "Normalized Close price", min: -10.0, max: 10.0, step: 0.01, default: 0.55, binary: false },
    FeatureField { name: "Volume", help: "Normalized Volume", min: -10.0, max: 10.0, step: 0.01, default: 0.3, binary: false },
    FeatureField { name: "SMA_20", help: "20-day Simple Moving Average", min: -10.0, max: 10.0, step: 0.01, default: 0.52, binary: false },
    FeatureField { name: "SMA_50", help: "50-day Simple Moving Average", min: -10.0, max: 10.0, step: 0.01, default: 0.51, binary: false },
    FeatureField { name: "RSI", help: "Relative Strength Index (0-100)", min: 0.0, max: 100.0, step: 0.1, default: 60.0, binary: false },
    FeatureField { name: "MACD", help: "MACD line", min: -10.0, max: 10.0, step: 0.01, default: 0.02, binary: false },
    FeatureField { name: "MACD_Signal", help: "MACD Signal line", min: -10.0, max: 10.0, step: 0.01, default: 0.01, binary: false },
    FeatureField { name: "Volatility_10d", help: "10-day volatility", min: 0.0, max: 10.0, step: 0.01, default: 0.05, binary: false },
    FeatureField { name: "ADX", help: "Average Directional Index (0-100)", min: 0.0, max: 100.0, step: 0.1, default: 25.0, binary: false },
    FeatureField { name: "Sentiment_Score", help: "Sentiment Score (-1 to 1)", min: -1.0, max: 1.0, step: 0.01, default: 0.7, binary: false },
    FeatureField { name: "Sentiment_Momentum", help: "Sentiment Momentum", min: -1.0, max: 1.0, step: 0.01, default: 0.1, binary: false },
    FeatureField { name: "Budget_Day", help: "1 if budget day, 0 otherwise", min: 0.0, max: 1.0, step: 1.0, default: 0.0, binary: true },
];

/// One prediction request. Built fresh per submission and discarded after the
/// result is rendered. Wire names match the training columns exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRow {
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: f64,
    #[serde(rename = "SMA_20")]
    pub sma_20: f64,
    #[serde(rename = "SMA_50")]
    pub sma_50: f64,
    #[serde(rename = "RSI")]
    pub rsi: f64,
    #[serde(rename = "MACD")]
    pub macd: f64,
    #[serde(rename = "MACD_Signal")]
    pub macd_signal: f64,
    #[serde(rename = "Volatility_10d")]
    pub volatility_10d: f64,
    #[serde(rename = "ADX")]
    pub adx: f64,
    #[serde(rename = "Sentiment_Score")]
    pub sentiment_score: f64,
    #[serde(rename = "Sentiment_Momentum")]
    pub sentiment_momentum: f64,
    #[serde(rename = "Budget_Day")]
    pub budget_day: f64,
}

impl Default for FeatureRow {
    fn default() -> Self {
        let d = |i: usize| FEATURE_SCHEMA[i].default;
        Self {
            open: d(0),
            high: d(1),
            low: d(2),
            close: d(3),
            volume: d(4),
            sma_20: d(5),
            sma_50: d(6),
            rsi: d(7),
            macd: d(8),
            macd_signal: d(9),
            volatility_10d: d(10),
            adx: d(11),
            sentiment_score: d(12),
            sentiment_momentum: d(13),
            budget_day: d(14),
        }
    }
}

impl FeatureRow {
    /// The ordered row handed to the scaler, in `FEATURE_SCHEMA` order.
    pub fn to_array(&self) -> [f64; NUM_FEATURES] {
        [
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.sma_20,
            self.sma_50,
            self.rsi,
            self.macd,
            self.macd_signal,
            self.volatility_10d,
            self.adx,
            self.sentiment_score,
            self.sentiment_momentum,
            self.budget_day,
        ]
    }

    /// Range enforcement for the input collector. The adapter itself never
    /// re-checks ranges; anything out of range is rejected here first.
    pub fn validate(&self) -> Result<(), InputError> {
        for (field, value) in FEATURE_SCHEMA.iter().zip(self.to_array()) {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field: field.name });
            }
            if field.binary {
                if value != 0.0 && value != 1.0 {
                    return Err(InputError::NotBinary { field: field.name, value });
                }
            } else if value < field.min || value > field.max {
                return Err(InputError::OutOfRange {
                    field: field.name,
                    min: field.min,
                    max: field.max,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_row_is_valid_and_ordered() {
        let row = FeatureRow::default();
        assert!(row.validate().is_ok());

        let values = row.to_array();
        assert_eq!(values.len(), NUM_FEATURES);
        for (field, value) in FEATURE_SCHEMA.iter().zip(values) {
            assert_eq!(value, field.default, "{} default out of order", field.name);
        }
    }

    #[test]
    fn rsi_and_adx_accept_only_their_bounds() {
        let mut row = FeatureRow::default();
        row.rsi = 100.0;
        assert!(row.validate().is_ok());
        row.rsi = 100.1;
        assert!(matches!(
            row.validate(),
            Err(InputError::OutOfRange { field: "RSI", .. })
        ));

        let mut row = FeatureRow::default();
        row.adx = -0.1;
        assert!(matches!(
            row.validate(),
            Err(InputError::OutOfRange { field: "ADX", .. })
        ));
    }

    #[test]
    fn sentiment_fields_are_bounded_to_unit_interval() {
        let mut row = FeatureRow::default();
        row.sentiment_score = -1.0;
        row.sentiment_momentum = 1.0;
        assert!(row.validate().is_ok());

        row.sentiment_momentum = 1.01;
        assert!(matches!(
            row.validate(),
            Err(InputError::OutOfRange { field: "Sentiment_Momentum", .. })
        ));
    }

    #[test]
    fn budget_day_accepts_only_zero_or_one() {
        let mut row = FeatureRow::default();
        row.budget_day = 1.0;
        assert!(row.validate().is_ok());

        row.budget_day = 0.5;
        assert!(matches!(
            row.validate(),
            Err(InputError::NotBinary { field: "Budget_Day", .. })
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut row = FeatureRow::default();
        row.close = f64::NAN;
        assert!(matches!(
            row.validate(),
            Err(InputError::NonFinite { field: "Close" })
        ));
    }
}
