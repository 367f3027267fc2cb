use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use crate::input::InputError;
use crate::input::reader::open_maybe_gz;
use crate::model::entity::{Entity, GeoPoint};

const NAME_ALIASES: &[&str] = &["name", "borough", "identifier"];
const ENGAGEMENT_ALIASES: &[&str] = &["engagement"];
const DWELL_ALIASES: &[&str] = &["dwell_time"];
const PERSONALIZATION_ALIASES: &[&str] = &["personalization_score", "personalization"];
const CONVERSION_ALIASES: &[&str] = &["conversion_rate"];
const LAT_ALIASES: &[&str] = &["latitude", "lat"];
const LON_ALIASES: &[&str] = &["longitude", "lon", "lng"];

pub const TABLE_HEADER: [&str; 7] = [
    "name",
    "engagement",
    "dwell_time",
    "personalization_score",
    "conversion_rate",
    "latitude",
    "longitude",
];

#[derive(Debug, Clone)]
struct ColumnMap {
    name: usize,
    engagement: usize,
    dwell_time: usize,
    personalization: usize,
    conversion_rate: usize,
    latitude: Option<usize>,
    longitude: Option<usize>,
    n_columns: usize,
}

impl ColumnMap {
    fn from_header(line: &str, line_no: usize) -> Result<Self, InputError> {
        let cols: Vec<String> = line
            .split('\t')
            .map(|s| s.trim().to_ascii_lowercase())
            .collect();
        let find = |aliases: &[&str]| cols.iter().position(|c| aliases.contains(&c.as_str()));
        let require = |aliases: &[&str]| {
            find(aliases).ok_or_else(|| InputError::Parse {
                line: line_no,
                message: format!("missing required column '{}'", aliases[0]),
            })
        };
        Ok(Self {
            name: require(NAME_ALIASES)?,
            engagement: require(ENGAGEMENT_ALIASES)?,
            dwell_time: require(DWELL_ALIASES)?,
            personalization: require(PERSONALIZATION_ALIASES)?,
            conversion_rate: require(CONVERSION_ALIASES)?,
            latitude: find(LAT_ALIASES),
            longitude: find(LON_ALIASES),
            n_columns: cols.len(),
        })
    }
}

pub fn parse_table(path: &Path) -> Result<Vec<Entity>, InputError> {
    let reader = open_maybe_gz(path)?;
    parse_table_reader(reader)
}

pub fn parse_table_reader<R: BufRead>(mut reader: R) -> Result<Vec<Entity>, InputError> {
    let mut buf = String::new();
    let mut line_no = 0usize;

    if !next_record(&mut reader, &mut buf, &mut line_no)? {
        return Err(InputError::Parse {
            line: line_no,
            message: "table has no header".to_string(),
        });
    }
    let map = ColumnMap::from_header(record(&buf), line_no)?;

    let mut entities = Vec::new();
    while next_record(&mut reader, &mut buf, &mut line_no)? {
        let fields: Vec<&str> = record(&buf).split('\t').collect();
        if fields.len() != map.n_columns {
            return Err(InputError::Parse {
                line: line_no,
                message: format!(
                    "expected {} fields, found {}",
                    map.n_columns,
                    fields.len()
                ),
            });
        }
        entities.push(parse_row(&fields, &map, line_no)?);
    }

    if entities.is_empty() {
        tracing::warn!("input table has a header but no rows");
    }

    Ok(entities)
}

/// Advances to the next non-blank, non-comment line. Returns false at EOF.
fn next_record<R: BufRead>(
    reader: &mut R,
    buf: &mut String,
    line_no: &mut usize,
) -> Result<bool, InputError> {
    loop {
        buf.clear();
        if reader.read_line(buf)? == 0 {
            return Ok(false);
        }
        *line_no += 1;
        let line = record(buf);
        if !line.trim().is_empty() && !line.starts_with('#') {
            return Ok(true);
        }
    }
}

fn record(buf: &str) -> &str {
    buf.trim_end_matches(['\r', '\n'])
}

fn parse_row(fields: &[&str], map: &ColumnMap, line_no: usize) -> Result<Entity, InputError> {
    let number = |idx: usize, column: &str| -> Result<f64, InputError> {
        let raw = fields[idx].trim();
        raw.parse::<f64>().map_err(|_| InputError::Parse {
            line: line_no,
            message: format!("invalid {column} value '{raw}'"),
        })
    };
    let optional = |idx: Option<usize>, column: &str| -> Result<Option<f64>, InputError> {
        match idx.map(|i| fields[i].trim()) {
            None | Some("") | Some("NA") => Ok(None),
            Some(_) => idx.map(|i| number(i, column)).transpose(),
        }
    };

    let latitude = optional(map.latitude, "latitude")?;
    let longitude = optional(map.longitude, "longitude")?;
    check_coordinate(latitude, "latitude", 90.0, line_no)?;
    check_coordinate(longitude, "longitude", 180.0, line_no)?;
    let location = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint {
            latitude,
            longitude,
        }),
        (None, None) => None,
        _ => {
            return Err(InputError::Parse {
                line: line_no,
                message: "latitude and longitude must be given together".to_string(),
            });
        }
    };

    Ok(Entity {
        name: fields[map.name].trim().to_string(),
        engagement: number(map.engagement, "engagement")?,
        dwell_time: number(map.dwell_time, "dwell_time")?,
        personalization_score: number(map.personalization, "personalization_score")?,
        conversion_rate: number(map.conversion_rate, "conversion_rate")?,
        location,
    })
}

fn check_coordinate(
    value: Option<f64>,
    column: &str,
    limit: f64,
    line_no: usize,
) -> Result<(), InputError> {
    match value {
        Some(v) if !v.is_finite() || v.abs() > limit => Err(InputError::Parse {
            line: line_no,
            message: format!("{column} {v} outside [-{limit}, {limit}]"),
        }),
        _ => Ok(()),
    }
}

/// Writes entities in the layout `parse_table` reads. Floats use the shortest
/// representation that parses back to the same value.
pub fn write_table(entities: &[Entity], path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", TABLE_HEADER.join("\t"))?;
    for e in entities {
        let (lat, lon) = match e.location {
            Some(p) => (p.latitude.to_string(), p.longitude.to_string()),
            None => (String::new(), String::new()),
        };
        let row = [
            e.name.clone(),
            e.engagement.to_string(),
            e.dwell_time.to_string(),
            e.personalization_score.to_string(),
            e.conversion_rate.to_string(),
            lat,
            lon,
        ]
        .join("\t");
        writeln!(w, "{}", row)?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
