use crate::model::entity::{Entity, Feature, feature_order};
use crate::model::scores::GroupMaxima;
use crate::pipeline::ScoreError;

/// Group maxima of the max-normalized features. A zero maximum would turn
/// every ratio for that feature into NaN, so it is reported instead.
pub fn run_stage2(entities: &[Entity]) -> Result<GroupMaxima, ScoreError> {
    let maxima = GroupMaxima {
        engagement: column_max(entities, Feature::Engagement),
        dwell_time: column_max(entities, Feature::DwellTime),
        conversion_rate: column_max(entities, Feature::ConversionRate),
    };

    for &feature in feature_order().iter().filter(|f| f.is_max_normalized()) {
        if let Some(denom) = maxima.denominator(feature) {
            if denom <= 0.0 {
                tracing::warn!(feature = feature.name(), "zero normalization denominator");
                return Err(ScoreError::DegenerateInput {
                    feature: feature.name(),
                });
            }
        }
    }

    tracing::debug!(
        max_engagement = maxima.engagement,
        max_dwell_time = maxima.dwell_time,
        max_conversion_rate = maxima.conversion_rate,
        "group maxima computed"
    );
    Ok(maxima)
}

pub fn column_max(entities: &[Entity], feature: Feature) -> f64 {
    entities
        .iter()
        .map(|e| e.value(feature))
        .fold(0.0, f64::max)
}

/// Feature value on the 0..1 scale used by the weighted sum.
pub fn normalized_value(entity: &Entity, maxima: &GroupMaxima, feature: Feature) -> f64 {
    let value = entity.value(feature);
    match maxima.denominator(feature) {
        Some(denom) => value / denom,
        None => value,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_normalize.rs"]
mod tests;
