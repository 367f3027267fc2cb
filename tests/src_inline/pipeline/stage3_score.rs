use super::*;
use crate::pipeline::score_entities;
use crate::pipeline::stage2_normalize::run_stage2;
use proptest::prelude::*;

fn score(entities: &[Entity]) -> Vec<ScoredEntity> {
    score_entities(entities, &ScoringProfile::selling_v1())
        .unwrap()
        .scored
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_three_borough_example() {
    let entities = vec![
        Entity::new("one", 10.0, 100.0, 0.6, 0.05),
        Entity::new("two", 20.0, 200.0, 0.8, 0.10),
        Entity::new("three", 30.0, 300.0, 1.0, 0.15),
    ];
    let out = score(&entities);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].entity.name, "one");
    assert_close(out[0].composite_score, 39.0);
    assert_close(out[1].composite_score, 69.0);
    assert_close(out[2].composite_score, 100.0);
    assert_eq!(out[2].rank, 1);
    assert_eq!(out[1].rank, 2);
    assert_eq!(out[0].rank, 3);
}

#[test]
fn test_max_engagement_does_not_imply_max_score() {
    let entities = vec![
        Entity::new("loud", 10.0, 10.0, 0.0, 0.01),
        Entity::new("sticky", 9.0, 100.0, 1.0, 0.10),
    ];
    let out = score(&entities);
    assert_close(out[0].composite_score, 44.0);
    assert_close(out[1].composite_score, 96.0);
    assert!(out[1].composite_score > out[0].composite_score);
    assert_eq!(out[1].rank, 1);
}

#[test]
fn test_single_entity_uses_raw_personalization() {
    let p = 0.35;
    let out = score(&[Entity::new("solo", 5.0, 5.0, p, 0.2)]);
    let expected = ((0.4 + 0.3 + 0.2 * p + 0.1) * 100.0).round();
    assert_eq!(out[0].composite_score, expected);
    assert_close(out[0].composite_score, 87.0);
}

#[test]
fn test_single_entity_full_personalization_hits_ceiling() {
    let out = score(&[Entity::new("solo", 1.0, 1.0, 1.0, 1.0)]);
    assert_close(out[0].composite_score, 100.0);
}

#[test]
fn test_all_zero_engagement_is_an_error() {
    let entities = vec![
        Entity::new("a", 0.0, 100.0, 0.6, 0.05),
        Entity::new("b", 0.0, 200.0, 0.8, 0.10),
    ];
    let err = score_entities(&entities, &ScoringProfile::selling_v1()).unwrap_err();
    assert_eq!(
        err,
        crate::pipeline::ScoreError::DegenerateInput {
            feature: "engagement"
        }
    );
}

#[test]
fn test_rounding_happens_before_scaling() {
    let profile = ScoringProfile::selling_v1();
    assert_close(composite_from_raw(0.38666, &profile), 39.0);
    assert_close(composite_from_raw(0.3849, &profile), 38.0);
    assert_close(composite_from_raw(1.2, &profile), 100.0);
}

#[test]
fn test_default_profile_scores_are_whole_numbers() {
    let profile = ScoringProfile::selling_v1();
    // 0.56 * 100.0 is 56.00000000000001 in f64
    assert_eq!(composite_from_raw(0.56, &profile), 56.0);
    assert_eq!(composite_from_raw(0.57, &profile), 57.0);
    assert_eq!(composite_from_raw(0.29, &profile), 29.0);
    for i in 0..=1000 {
        let score = composite_from_raw(i as f64 / 1000.0, &profile);
        assert_eq!(score, score.round(), "raw {}", i as f64 / 1000.0);
    }
}

#[test]
fn test_finer_rounding_profile() {
    let mut profile = ScoringProfile::selling_v1();
    profile.round_decimals = 3;
    assert_close(composite_from_raw(0.38666, &profile), 38.7);
}

#[test]
fn test_contributions_sum_to_raw_and_drivers_sorted() {
    let entities = vec![
        Entity::new("a", 10.0, 300.0, 0.5, 0.05),
        Entity::new("b", 20.0, 150.0, 0.2, 0.10),
    ];
    let maxima = run_stage2(&entities).unwrap();
    let out = run_stage3(&entities, &maxima, &ScoringProfile::selling_v1());

    let a = &out[0];
    let sum: f64 = a.contributions.iter().map(|(_, v)| v).sum();
    assert_close(sum, a.raw);
    assert_close(a.contribution(Feature::Engagement), 0.2);
    assert_close(a.contribution(Feature::DwellTime), 0.3);
    assert_close(a.contribution(Feature::Personalization), 0.1);
    assert_close(a.contribution(Feature::ConversionRate), 0.05);
    assert_eq!(a.top_driver(), Some(Feature::DwellTime));
    let order: Vec<Feature> = a.drivers.iter().map(|(f, _)| *f).collect();
    assert_eq!(
        order,
        vec![
            Feature::DwellTime,
            Feature::Engagement,
            Feature::Personalization,
            Feature::ConversionRate
        ]
    );
}

#[test]
fn test_driver_ties_break_by_name() {
    // personalization 0.2 * 0.5 and conversion_rate 0.1 * 1.0 are both 0.1
    let entities = vec![Entity::new("a", 1.0, 1.0, 0.5, 1.0)];
    let out = score(&entities);
    let tail: Vec<Feature> = out[0].drivers[2..].iter().map(|(f, _)| *f).collect();
    assert_eq!(tail, vec![Feature::ConversionRate, Feature::Personalization]);
}

#[test]
fn test_ties_keep_input_order_for_rank() {
    let entities = vec![
        Entity::new("first", 10.0, 10.0, 0.5, 0.1),
        Entity::new("second", 10.0, 10.0, 0.5, 0.1),
    ];
    let out = score(&entities);
    assert_eq!(out[0].rank, 1);
    assert_eq!(out[1].rank, 2);
}

fn entity_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (
        0.001f64..1000.0,
        0.001f64..1000.0,
        0.0f64..=1.0,
        0.001f64..=1.0,
    )
}

fn build(rows: &[(f64, f64, f64, f64)]) -> Vec<Entity> {
    rows.iter()
        .enumerate()
        .map(|(i, &(e, d, p, c))| Entity::new(format!("e{i}"), e, d, p, c))
        .collect()
}

proptest! {
    #[test]
    fn prop_scores_within_bounds(rows in prop::collection::vec(entity_strategy(), 1..25)) {
        let out = score(&build(&rows));
        for s in &out {
            prop_assert!(s.composite_score >= 0.0);
            prop_assert!(s.composite_score <= 100.0);
        }
    }

    #[test]
    fn prop_engagement_scale_invariance(
        rows in prop::collection::vec(entity_strategy(), 1..25),
        factor in prop_oneof![
            Just(0.25f64),
            Just(2.0),
            Just(1024.0),
            Just(0.1),
            Just(3.0),
            Just(7.5),
            0.01f64..1000.0,
        ],
    ) {
        let base = build(&rows);
        let scaled: Vec<Entity> = base
            .iter()
            .cloned()
            .map(|mut e| {
                e.engagement *= factor;
                e
            })
            .collect();
        let a = score(&base);
        let b = score(&scaled);
        for (x, y) in a.iter().zip(b.iter()) {
            // Non-binary factors move the ratios by a few ulps at most.
            prop_assert!((x.raw - y.raw).abs() < 1e-12);
            prop_assert!(
                (x.composite_score - y.composite_score).abs() < 1e-9,
                "{} vs {} (raw {} vs {})",
                x.composite_score,
                y.composite_score,
                x.raw,
                y.raw
            );
        }
    }
}
