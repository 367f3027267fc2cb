use serde::Serialize;
use thiserror::Error;

use crate::model::profile::FeatureWeights;
use crate::model::scores::GroupMaxima;

pub mod json;
pub mod text;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub source: String,
    pub seed: Option<u64>,
    pub n_entities: usize,
    pub n_with_location: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileMeta {
    pub name: String,
    pub weights: FeatureWeights,
    pub round_decimals: u32,
    pub score_ceiling: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreStats {
    pub min: f64,
    pub median: f64,
    pub p90: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureShare {
    pub feature: &'static str,
    pub mean_share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub name: String,
    pub composite_score: f64,
    pub top_driver: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub profile: ProfileMeta,
    pub maxima: GroupMaxima,
    pub scores: ScoreStats,
    pub contribution_share: Vec<FeatureShare>,
    pub top: Vec<RankedEntry>,
}

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx.min(n - 1)]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn score_stats(values: &[f64]) -> ScoreStats {
    ScoreStats {
        min: quantile_indexed(values, 0.0),
        median: median(values),
        p90: p90(values),
        max: quantile_indexed(values, 1.0),
        mean: mean(values),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
