use crate::model::entity::{Entity, Feature, feature_order};
use crate::model::profile::ScoringProfile;
use crate::model::scores::{GroupMaxima, ScoredEntity};
use crate::pipeline::stage2_normalize::normalized_value;

pub fn run_stage3(
    entities: &[Entity],
    maxima: &GroupMaxima,
    profile: &ScoringProfile,
) -> Vec<ScoredEntity> {
    let mut scored = Vec::with_capacity(entities.len());

    for entity in entities {
        let contributions: Vec<(Feature, f64)> = feature_order()
            .iter()
            .map(|&f| (f, profile.weight(f) * normalized_value(entity, maxima, f)))
            .collect();
        let raw = contributions.iter().fold(0.0, |acc, (_, v)| acc + v);
        let composite_score = composite_from_raw(raw, profile);

        scored.push(ScoredEntity {
            entity: entity.clone(),
            drivers: sort_drivers(&contributions),
            contributions,
            raw,
            composite_score,
            rank: 0,
        });
    }

    assign_ranks(&mut scored);
    scored
}

/// Round the fraction first, then scale, then clamp. Scaling goes through the
/// integer count of rounding units so the default profile yields whole numbers.
pub fn composite_from_raw(raw: f64, profile: &ScoringProfile) -> f64 {
    let factor = 10f64.powi(profile.round_decimals as i32);
    let units = (raw * factor).round();
    (units * (profile.score_scale / factor)).min(profile.score_ceiling)
}

fn sort_drivers(contributions: &[(Feature, f64)]) -> Vec<(Feature, f64)> {
    let mut v = contributions.to_vec();
    v.sort_by(|a, b| {
        match b
            .1
            .abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
        {
            std::cmp::Ordering::Equal => a.0.name().cmp(b.0.name()),
            other => other,
        }
    });
    v
}

/// 1-based rank by descending score; ties keep input order.
fn assign_ranks(scored: &mut [ScoredEntity]) {
    let mut order = (0..scored.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        match scored[b]
            .composite_score
            .partial_cmp(&scored[a].composite_score)
            .unwrap_or(std::cmp::Ordering::Equal)
        {
            std::cmp::Ordering::Equal => a.cmp(&b),
            other => other,
        }
    });
    for (pos, idx) in order.into_iter().enumerate() {
        scored[idx].rank = pos + 1;
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_score.rs"]
mod tests;
