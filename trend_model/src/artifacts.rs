use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;

use crate::classifier::RandomForestClassifier;
use crate::error::ArtifactLoadError;
use crate::scaler::StandardScaler;
use crate::schema::FEATURE_SCHEMA;

pub const SCALER_FILE: &str = "scaler.bin";
pub const MODEL_FILE: &str = "trend_model.bin";

/// Both fitted artifacts, loaded once at process start and read-only for the
/// process lifetime.
#[derive(Debug)]
pub struct ModelArtifacts {
    pub scaler: StandardScaler,
    pub classifier: RandomForestClassifier,
}

impl ModelArtifacts {
    /// Loads `scaler.bin` and `trend_model.bin` from the working directory.
    pub fn load() -> Result<Self, ArtifactLoadError> {
        Self::load_from_dir(Path::new("."))
    }

    /// Shape and schema consistency are checked here, once, so per-request
    /// code can trust the fitted widths. A scaler whose feature names differ
    /// from `FEATURE_SCHEMA` (order included) fails the load: a reordered
    /// artifact would otherwise corrupt every prediction silently.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ArtifactLoadError> {
        let scaler: StandardScaler = read_artifact(&dir.join(SCALER_FILE))?;
        let classifier: RandomForestClassifier = read_artifact(&dir.join(MODEL_FILE))?;

        let width = FEATURE_SCHEMA.len();
        if scaler.feature_names.len() != width {
            return Err(ArtifactLoadError::FeatureCount {
                expected: width,
                actual: scaler.feature_names.len(),
            });
        }
        if scaler.mean.len() != width || scaler.scale.len() != width {
            return Err(ArtifactLoadError::FeatureCount {
                expected: width,
                actual: scaler.mean.len().min(scaler.scale.len()),
            });
        }
        for (position, (name, field)) in
            scaler.feature_names.iter().zip(FEATURE_SCHEMA.iter()).enumerate()
        {
            if name != field.name {
                return Err(ArtifactLoadError::SchemaMismatch {
                    position,
                    expected: field.name.to_string(),
                    actual: name.clone(),
                });
            }
        }

        if classifier.n_features != scaler.n_features() {
            return Err(ArtifactLoadError::ArtifactMismatch {
                scaler_features: scaler.n_features(),
                classifier_features: classifier.n_features,
            });
        }
        if classifier.n_classes != 2 {
            return Err(ArtifactLoadError::ClassCount { actual: classifier.n_classes });
        }

        info!(
            "Loaded scaler ({} features) and classifier ({} trees)",
            scaler.n_features(),
            classifier.trees.len()
        );
        Ok(Self { scaler, classifier })
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactLoadError> {
    let file = File::open(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    bincode::deserialize_from(BufReader::new(file)).map_err(|source| ArtifactLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
