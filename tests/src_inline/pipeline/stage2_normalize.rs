use super::*;

#[test]
fn test_group_maxima() {
    let entities = vec![
        Entity::new("a", 10.0, 300.0, 0.9, 0.05),
        Entity::new("b", 30.0, 100.0, 0.1, 0.15),
    ];
    let maxima = run_stage2(&entities).unwrap();
    assert_eq!(maxima.engagement, 30.0);
    assert_eq!(maxima.dwell_time, 300.0);
    assert_eq!(maxima.conversion_rate, 0.15);
}

#[test]
fn test_zero_engagement_is_degenerate() {
    let entities = vec![
        Entity::new("a", 0.0, 300.0, 0.9, 0.05),
        Entity::new("b", 0.0, 100.0, 0.1, 0.15),
    ];
    assert_eq!(
        run_stage2(&entities),
        Err(ScoreError::DegenerateInput {
            feature: "engagement"
        })
    );
}

#[test]
fn test_zero_conversion_is_degenerate() {
    let entities = vec![Entity::new("a", 5.0, 10.0, 0.5, 0.0)];
    assert_eq!(
        run_stage2(&entities),
        Err(ScoreError::DegenerateInput {
            feature: "conversion_rate"
        })
    );
}

#[test]
fn test_zero_personalization_is_not_degenerate() {
    let entities = vec![Entity::new("a", 5.0, 10.0, 0.0, 0.1)];
    assert!(run_stage2(&entities).is_ok());
}

#[test]
fn test_normalized_value() {
    let entities = vec![
        Entity::new("a", 10.0, 50.0, 0.4, 0.05),
        Entity::new("b", 40.0, 200.0, 0.8, 0.20),
    ];
    let maxima = run_stage2(&entities).unwrap();
    assert_eq!(normalized_value(&entities[0], &maxima, Feature::Engagement), 0.25);
    assert_eq!(normalized_value(&entities[0], &maxima, Feature::DwellTime), 0.25);
    assert_eq!(
        normalized_value(&entities[0], &maxima, Feature::Personalization),
        0.4
    );
    assert_eq!(
        normalized_value(&entities[1], &maxima, Feature::ConversionRate),
        1.0
    );
}
