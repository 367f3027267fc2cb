use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::entity::Entity;

pub mod reader;
pub mod synthetic;
pub mod table;

use synthetic::{SyntheticParams, generate_boroughs};
use table::parse_table;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Table { path: PathBuf },
    Synthetic { seed: u64 },
}

impl InputSource {
    pub fn describe(&self) -> String {
        match self {
            InputSource::Table { path } => format!("table:{}", path.display()),
            InputSource::Synthetic { seed } => format!("synthetic:london_boroughs(seed={seed})"),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        match self {
            InputSource::Table { .. } => None,
            InputSource::Synthetic { seed } => Some(*seed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputBundle {
    pub entities: Vec<Entity>,
    pub source: InputSource,
}

/// Reads the table at `input`, or generates the synthetic borough table when
/// no path is given.
pub fn load_input(input: Option<&Path>, seed: u64) -> Result<InputBundle, InputError> {
    match input {
        Some(path) => load_input_table(path),
        None => Ok(load_input_synthetic(seed)),
    }
}

pub fn load_input_table(path: &Path) -> Result<InputBundle, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "table not found: {}",
            path.display()
        )));
    }
    if path.is_dir() {
        return Err(InputError::InvalidInput(format!(
            "expected a file, got directory: {}",
            path.display()
        )));
    }
    let entities = parse_table(path)?;
    tracing::info!(
        path = %path.display(),
        n_entities = entities.len(),
        "loaded input table"
    );
    Ok(InputBundle {
        entities,
        source: InputSource::Table {
            path: path.to_path_buf(),
        },
    })
}

pub fn load_input_synthetic(seed: u64) -> InputBundle {
    let params = SyntheticParams::with_seed(seed);
    let entities = generate_boroughs(&params);
    tracing::info!(seed, n_entities = entities.len(), "generated synthetic boroughs");
    InputBundle {
        entities,
        source: InputSource::Synthetic { seed },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/mod.rs"]
mod tests;
