use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::entity::Feature;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read weights file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse weights file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid weight for {feature}: {value}")]
    InvalidWeight { feature: &'static str, value: f64 },
    #[error("weights must sum to 1, got {0}")]
    WeightSum(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureWeights {
    pub engagement: f64,
    pub dwell_time: f64,
    pub personalization_score: f64,
    pub conversion_rate: f64,
}

impl FeatureWeights {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Engagement => self.engagement,
            Feature::DwellTime => self.dwell_time,
            Feature::Personalization => self.personalization_score,
            Feature::ConversionRate => self.conversion_rate,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut sum = 0.0;
        for &feature in crate::model::entity::feature_order() {
            let value = self.get(feature);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    feature: feature.name(),
                    value,
                });
            }
            sum += value;
        }
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ScoringProfile {
    pub name: String,
    pub weights: FeatureWeights,
    pub round_decimals: u32,
    pub score_scale: f64,
    pub score_ceiling: f64,
}

impl ScoringProfile {
    /// Predictive selling score: 40/30/20/10 split, fraction rounded to two
    /// decimals, then scaled to 0..100.
    pub fn selling_v1() -> Self {
        Self {
            name: "selling_v1".to_string(),
            weights: FeatureWeights {
                engagement: 0.40,
                dwell_time: 0.30,
                personalization_score: 0.20,
                conversion_rate: 0.10,
            },
            round_decimals: 2,
            score_scale: 100.0,
            score_ceiling: 100.0,
        }
    }

    pub fn weight(&self, feature: Feature) -> f64 {
        self.weights.get(feature)
    }

    pub fn with_weights(mut self, weights: FeatureWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        self.weights = weights;
        self.name = format!("{}+custom_weights", self.name);
        Ok(self)
    }

    pub fn with_weights_file(self, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let weights: FeatureWeights =
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), ?weights, "loaded custom weights");
        self.with_weights(weights)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/profile.rs"]
mod tests;
