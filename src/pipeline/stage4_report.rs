use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::input::InputSource;
use crate::model::entity::{Feature, feature_order};
use crate::model::profile::ScoringProfile;
use crate::model::scores::{GroupMaxima, ScoredEntity};
use crate::report::json::{render_markers_geojson, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{
    FeatureShare, InputMeta, ProfileMeta, RankedEntry, ReportError, SummaryData, ToolMeta,
    format_f64_2, format_f64_6, score_stats,
};

pub const SCORES_FILE: &str = "scores.tsv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const REPORT_FILE: &str = "report.txt";
pub const MARKERS_FILE: &str = "markers.geojson";

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub scored: &'a [ScoredEntity],
    pub maxima: &'a GroupMaxima,
    pub profile: &'a ScoringProfile,
    pub source: &'a InputSource,
    pub top_n: usize,
    pub tool_name: String,
    pub tool_version: String,
}

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub scores: PathBuf,
    pub summary: PathBuf,
    pub report: PathBuf,
    pub markers: Option<PathBuf>,
}

pub fn write_reports(input: &Stage4Input<'_>, out_dir: &Path) -> Result<ReportPaths, ReportError> {
    fs::create_dir_all(out_dir)?;

    let scores_path = out_dir.join(SCORES_FILE);
    write_scores_tsv(input.scored, &scores_path)?;

    let summary = build_summary(input);
    let summary_path = out_dir.join(SUMMARY_FILE);
    write_text(&summary_path, &render_summary_json(&summary)?)?;

    let report_path = out_dir.join(REPORT_FILE);
    write_text(&report_path, &render_report_text(&summary))?;

    let markers = match render_markers_geojson(input.scored) {
        Some(json) => {
            let path = out_dir.join(MARKERS_FILE);
            write_text(&path, &json?)?;
            Some(path)
        }
        None => {
            tracing::info!("no entity has coordinates; skipping {}", MARKERS_FILE);
            None
        }
    };

    tracing::info!(out_dir = %out_dir.display(), "reports written");

    Ok(ReportPaths {
        scores: scores_path,
        summary: summary_path,
        report: report_path,
        markers,
    })
}

fn write_scores_tsv(scored: &[ScoredEntity], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "rank",
        "name",
        "engagement",
        "dwell_time",
        "personalization_score",
        "conversion_rate",
        "composite_score",
        "top_driver",
        "drivers",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for s in scored {
        let e = &s.entity;
        let row = [
            s.rank.to_string(),
            e.name.clone(),
            e.engagement.to_string(),
            e.dwell_time.to_string(),
            e.personalization_score.to_string(),
            e.conversion_rate.to_string(),
            format_f64_2(s.composite_score),
            s.top_driver().map(Feature::name).unwrap_or("").to_string(),
            format_drivers(&s.drivers),
        ]
        .join("\t");
        writeln!(w, "{}", row)?;
    }

    w.flush()
}

fn format_drivers(drivers: &[(Feature, f64)]) -> String {
    drivers
        .iter()
        .map(|(f, v)| format!("{}:{}", f.name(), format_f64_6(*v)))
        .collect::<Vec<_>>()
        .join(";")
}

pub fn build_summary(input: &Stage4Input<'_>) -> SummaryData {
    let scores: Vec<f64> = input.scored.iter().map(|s| s.composite_score).collect();

    let mut ranked: Vec<&ScoredEntity> = input.scored.iter().collect();
    ranked.sort_by_key(|s| s.rank);
    let top = ranked
        .into_iter()
        .take(input.top_n)
        .map(|s| RankedEntry {
            rank: s.rank,
            name: s.entity.name.clone(),
            composite_score: s.composite_score,
            top_driver: s.top_driver().map(Feature::name),
        })
        .collect();

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        input: InputMeta {
            source: input.source.describe(),
            seed: input.source.seed(),
            n_entities: input.scored.len(),
            n_with_location: input
                .scored
                .iter()
                .filter(|s| s.entity.location.is_some())
                .count(),
        },
        profile: ProfileMeta {
            name: input.profile.name.clone(),
            weights: input.profile.weights,
            round_decimals: input.profile.round_decimals,
            score_ceiling: input.profile.score_ceiling,
        },
        maxima: *input.maxima,
        scores: score_stats(&scores),
        contribution_share: contribution_shares(input.scored),
        top,
    }
}

/// Mean fraction of the raw score carried by each feature; entities with a
/// zero raw score are left out.
fn contribution_shares(scored: &[ScoredEntity]) -> Vec<FeatureShare> {
    let positive: Vec<&ScoredEntity> = scored.iter().filter(|s| s.raw > 0.0).collect();
    feature_order()
        .iter()
        .map(|&feature| {
            let mean_share = if positive.is_empty() {
                0.0
            } else {
                positive
                    .iter()
                    .map(|s| s.contribution(feature) / s.raw)
                    .sum::<f64>()
                    / positive.len() as f64
            };
            FeatureShare {
                feature: feature.name(),
                mean_share,
            }
        })
        .collect()
}

fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        w.write_all(b"\n")?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
