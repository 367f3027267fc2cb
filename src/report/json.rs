use serde_json::{Value, json};

use crate::model::scores::ScoredEntity;
use crate::report::SummaryData;

pub fn render_summary_json(data: &SummaryData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// GeoJSON points for entities with coordinates, or `None` when no entity has any.
pub fn render_markers_geojson(
    scored: &[ScoredEntity],
) -> Option<Result<String, serde_json::Error>> {
    let features: Vec<Value> = scored
        .iter()
        .filter_map(|s| {
            let loc = s.entity.location?;
            Some(json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [loc.longitude, loc.latitude],
                },
                "properties": {
                    "name": s.entity.name,
                    "composite_score": s.composite_score,
                    "rank": s.rank,
                    "top_driver": s.top_driver().map(|f| f.name()),
                },
            }))
        })
        .collect();

    if features.is_empty() {
        return None;
    }

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    Some(serde_json::to_string_pretty(&collection))
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
