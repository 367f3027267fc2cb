use std::collections::HashSet;

use crate::model::entity::{Entity, Feature, feature_order};
use crate::pipeline::ScoreError;

pub fn run_stage1(entities: &[Entity]) -> Result<(), ScoreError> {
    if entities.is_empty() {
        return Err(ScoreError::EmptyInput);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(entities.len());
    for (row, entity) in entities.iter().enumerate() {
        if entity.name.trim().is_empty() {
            return Err(ScoreError::EmptyIdentifier { row });
        }
        if !seen.insert(entity.name.as_str()) {
            return Err(ScoreError::DuplicateIdentifier(entity.name.clone()));
        }
        for &feature in feature_order() {
            check_feature(entity, feature)?;
        }
        check_location(entity)?;
    }

    tracing::debug!(n_entities = entities.len(), "input validated");
    Ok(())
}

fn check_feature(entity: &Entity, feature: Feature) -> Result<(), ScoreError> {
    let value = entity.value(feature);
    let reason = if !value.is_finite() {
        Some("not finite")
    } else if value < 0.0 {
        Some("negative")
    } else if bounded_unit(feature) && value > 1.0 {
        Some("above 1")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ScoreError::InvalidFeature {
            name: entity.name.clone(),
            feature: feature.name(),
            value,
            reason,
        }),
        None => Ok(()),
    }
}

fn check_location(entity: &Entity) -> Result<(), ScoreError> {
    let Some(loc) = entity.location else {
        return Ok(());
    };
    for (feature, value, limit) in [
        ("latitude", loc.latitude, 90.0),
        ("longitude", loc.longitude, 180.0),
    ] {
        let reason = if !value.is_finite() {
            Some("not finite")
        } else if value.abs() > limit {
            Some("out of range")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ScoreError::InvalidFeature {
                name: entity.name.clone(),
                feature,
                value,
                reason,
            });
        }
    }
    Ok(())
}

fn bounded_unit(feature: Feature) -> bool {
    matches!(feature, Feature::Personalization | Feature::ConversionRate)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
