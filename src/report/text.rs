use crate::model::entity::feature_order;
use crate::report::{ScoreStats, SummaryData, format_f64_2, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Predictive Selling Score Report\n");
    out.push_str("===============================\n\n");

    out.push_str("1. Run\n");
    out.push_str(&format!("Source: {}\n", data.input.source));
    out.push_str(&format!("Entities scored: {}\n", data.input.n_entities));
    out.push_str(&format!(
        "Profile: {} ({})\n\n",
        data.profile.name,
        weights_line(data)
    ));

    out.push_str("2. Normalization maxima\n");
    out.push_str(&format!(
        "engagement: {}\ndwell_time: {}\nconversion_rate: {}\n\n",
        format_f64_6(data.maxima.engagement),
        format_f64_6(data.maxima.dwell_time),
        format_f64_6(data.maxima.conversion_rate)
    ));

    out.push_str("3. Score distribution\n");
    let s = &data.scores;
    out.push_str(&format!(
        "min: {}\nmedian: {}\np90: {}\nmax: {}\nmean: {}\n",
        format_f64_2(s.min),
        format_f64_2(s.median),
        format_f64_2(s.p90),
        format_f64_2(s.max),
        format_f64_2(s.mean)
    ));
    out.push_str(&format!("{}\n\n", spread_statement(s)));

    out.push_str(&format!("4. Top {}\n", data.top.len()));
    let width = data.top.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for r in &data.top {
        out.push_str(&format!(
            "{:>3}. {:<width$}  {:>6}  driver: {}\n",
            r.rank,
            r.name,
            format_f64_2(r.composite_score),
            r.top_driver.unwrap_or("-"),
            width = width
        ));
    }
    out.push('\n');

    out.push_str("5. Mean contribution share\n");
    for share in &data.contribution_share {
        out.push_str(&format!(
            "{}: {}\n",
            share.feature,
            format_f64_6(share.mean_share)
        ));
    }

    out
}

fn weights_line(data: &SummaryData) -> String {
    feature_order()
        .iter()
        .map(|&f| format!("{}={:.2}", f.name(), data.profile.weights.get(f)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn spread_statement(stats: &ScoreStats) -> &'static str {
    let spread = stats.max - stats.min;
    if spread <= 0.0 {
        "All entities share the same score."
    } else if spread < 20.0 {
        "Scores are tightly clustered."
    } else if stats.p90 - stats.median >= 20.0 {
        "A small group of entities leads the rest by a wide margin."
    } else {
        "Scores are spread across the range."
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
