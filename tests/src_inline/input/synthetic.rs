use super::*;

#[test]
fn test_borough_count_and_unique_names() {
    assert_eq!(LONDON_BOROUGHS.len(), 33);
    let mut names: Vec<&str> = LONDON_BOROUGHS.iter().map(|b| b.0).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 33);
}

#[test]
fn test_same_seed_same_table() {
    let a = generate_boroughs(&SyntheticParams::with_seed(123));
    let b = generate_boroughs(&SyntheticParams::with_seed(123));
    assert_eq!(a, b);
}

#[test]
fn test_different_seed_different_table() {
    let a = generate_boroughs(&SyntheticParams::with_seed(1));
    let b = generate_boroughs(&SyntheticParams::with_seed(2));
    assert_ne!(a, b);
}

#[test]
fn test_values_within_ranges() {
    let params = SyntheticParams::default();
    for e in generate_boroughs(&params) {
        assert!((100.0..=1000.0).contains(&e.engagement));
        assert_eq!(e.engagement.fract(), 0.0);
        assert!((30.0..300.0).contains(&e.dwell_time));
        assert!((0.0..1.0).contains(&e.personalization_score));
        assert!((0.01..0.20).contains(&e.conversion_rate));
        let loc = e.location.unwrap();
        assert!((51.2..51.8).contains(&loc.latitude));
        assert!((-0.6..0.3).contains(&loc.longitude));
    }
}

#[test]
fn test_synthetic_table_scores_cleanly() {
    let entities = generate_boroughs(&SyntheticParams::default());
    let out = crate::pipeline::score_entities(
        &entities,
        &crate::model::profile::ScoringProfile::selling_v1(),
    )
    .unwrap();
    assert_eq!(out.scored.len(), 33);
    assert!(out.scored.iter().any(|s| s.rank == 1));
}
