use super::*;

#[test]
fn test_known_levels_accepted() {
    for level in LOG_LEVELS {
        let (_, rejected) = level_filter(level);
        assert!(rejected.is_none(), "{level} rejected");
    }
    assert!(level_filter("DEBUG").1.is_none());
}

#[test]
fn test_unknown_level_falls_back() {
    let (_, rejected) = level_filter("verbose");
    assert_eq!(rejected.as_deref(), Some("verbose"));
}

#[test]
fn test_malformed_directive_falls_back() {
    let (_, rejected) = level_filter("info,[");
    assert_eq!(rejected.as_deref(), Some("info,["));
}
