use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Engagement,
    DwellTime,
    #[serde(rename = "personalization_score")]
    Personalization,
    ConversionRate,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::Engagement => "engagement",
            Feature::DwellTime => "dwell_time",
            Feature::Personalization => "personalization_score",
            Feature::ConversionRate => "conversion_rate",
        }
    }

    /// Features divided by their group maximum before weighting.
    pub fn is_max_normalized(self) -> bool {
        !matches!(self, Feature::Personalization)
    }
}

/// Column and summation order of the four scoring features.
pub fn feature_order() -> &'static [Feature] {
    &[
        Feature::Engagement,
        Feature::DwellTime,
        Feature::Personalization,
        Feature::ConversionRate,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub engagement: f64,
    pub dwell_time: f64,
    pub personalization_score: f64,
    pub conversion_rate: f64,
    pub location: Option<GeoPoint>,
}

impl Entity {
    pub fn new(
        name: impl Into<String>,
        engagement: f64,
        dwell_time: f64,
        personalization_score: f64,
        conversion_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            engagement,
            dwell_time,
            personalization_score,
            conversion_rate,
            location: None,
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoPoint {
            latitude,
            longitude,
        });
        self
    }

    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Engagement => self.engagement,
            Feature::DwellTime => self.dwell_time,
            Feature::Personalization => self.personalization_score,
            Feature::ConversionRate => self.conversion_rate,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/entity.rs"]
mod tests;
