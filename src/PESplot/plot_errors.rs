use crate::Utils::load_from_file::SectionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error("connection {index} ({first}, {second}): species '{species}' has no energy")]
    UnknownSpecies {
        index: usize,
        species: String,
        first: String,
        second: String,
    },
    #[error("connection {index} ({first}, {second}) is malformed: {reason}")]
    MalformedConnection {
        index: usize,
        first: String,
        second: String,
        reason: String,
    },
    #[error("surface has no species")]
    EmptySurface,
    #[error("plot setting '{name}' must be positive, got {value}")]
    InvalidSetting { name: String, value: f64 },
    #[error("species '{0}' has a non-finite energy")]
    NonFiniteEnergy(String),
}
