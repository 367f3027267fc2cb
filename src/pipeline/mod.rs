use thiserror::Error;

use crate::model::entity::Entity;
use crate::model::profile::ScoringProfile;
use crate::model::scores::{GroupMaxima, ScoredEntity};

pub mod stage1_validate;
pub mod stage2_normalize;
pub mod stage3_score;
pub mod stage4_report;

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("no entities to score")]
    EmptyInput,
    #[error("entity at row {row} has an empty identifier")]
    EmptyIdentifier { row: usize },
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),
    #[error("invalid {feature} for {name}: {value} ({reason})")]
    InvalidFeature {
        name: String,
        feature: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("degenerate input: maximum {feature} is zero, cannot normalize")]
    DegenerateInput { feature: &'static str },
}

#[derive(Debug, Clone)]
pub struct ScoringOutput {
    pub maxima: GroupMaxima,
    pub scored: Vec<ScoredEntity>,
}

/// Stages 1-3: validate, compute group maxima, score. Output keeps input order.
pub fn score_entities(
    entities: &[Entity],
    profile: &ScoringProfile,
) -> Result<ScoringOutput, ScoreError> {
    stage1_validate::run_stage1(entities)?;
    let maxima = stage2_normalize::run_stage2(entities)?;
    let scored = stage3_score::run_stage3(entities, &maxima, profile);
    Ok(ScoringOutput { maxima, scored })
}
