use std::path::PathBuf;
use thiserror::Error;

/// Startup-fatal: no prediction is ever served without both artifacts loaded.
#[derive(Error, Debug)]
pub enum ArtifactLoadError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode artifact {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("scaler artifact width {actual} does not match the expected {expected} features")]
    FeatureCount { expected: usize, actual: usize },

    #[error("scaler feature {position} is {actual:?}, expected {expected:?}")]
    SchemaMismatch {
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("scaler is fitted on {scaler_features} features but classifier expects {classifier_features}")]
    ArtifactMismatch {
        scaler_features: usize,
        classifier_features: usize,
    },

    #[error("classifier predicts {actual} classes, expected 2")]
    ClassCount { actual: usize },
}

/// Per-request: surfaced inline to the caller, the process keeps serving.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("feature row has {actual} values but the artifact was fitted on {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("scaler has a degenerate scale for feature {feature}")]
    DegenerateScale { feature: usize },

    #[error("classifier has no trees")]
    EmptyForest,

    #[error("classifier artifact is malformed: {reason}")]
    MalformedTree { reason: &'static str },

    #[error("classifier produced a non-finite probability")]
    NonFiniteProbability,
}

/// Raised by the input collector before a row ever reaches the adapter.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be 0 or 1, got {value}")]
    NotBinary { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}
