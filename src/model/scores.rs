use serde::Serialize;

use crate::model::entity::{Entity, Feature};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupMaxima {
    pub engagement: f64,
    pub dwell_time: f64,
    pub conversion_rate: f64,
}

impl GroupMaxima {
    /// Denominator for a feature; `None` for features used as-is.
    pub fn denominator(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Engagement => Some(self.engagement),
            Feature::DwellTime => Some(self.dwell_time),
            Feature::Personalization => None,
            Feature::ConversionRate => Some(self.conversion_rate),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoredEntity {
    pub entity: Entity,
    /// Weighted terms in feature order; they sum to `raw`.
    pub contributions: Vec<(Feature, f64)>,
    /// Contributions sorted by magnitude, ties by feature name.
    pub drivers: Vec<(Feature, f64)>,
    pub raw: f64,
    pub composite_score: f64,
    pub rank: usize,
}

impl ScoredEntity {
    pub fn top_driver(&self) -> Option<Feature> {
        self.drivers.first().map(|(f, _)| *f)
    }

    pub fn contribution(&self, feature: Feature) -> f64 {
        self.contributions
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }
}
