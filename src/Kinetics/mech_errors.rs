use thiserror::Error;

/// error types for reading, grouping and writing reaction mechanisms
#[derive(Debug, Error)]
pub enum MechanismError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("species dictionary error: {0}")]
    Csv(#[from] csv::Error),
    #[error("mechanism format '{0}' is not supported (only 'chemkin' is)")]
    UnsupportedFormat(String),
    #[error("no 'REACTIONS' block found in mechanism")]
    NoReactionsBlock,
    #[error("line {line}: malformed reaction '{text}': {reason}")]
    MalformedReaction {
        line: usize,
        text: String,
        reason: String,
    },
    #[error(
        "line {line}: species '{species}' is neither in the species dictionary nor a valid formula"
    )]
    UnknownSpecies { line: usize, species: String },
    #[error("invalid formula '{formula}': {reason}")]
    Formula { formula: String, reason: String },
    #[error("reaction lists have different lengths: {0}")]
    LengthMismatch(String),
}

impl MechanismError {
    pub(crate) fn formula(formula: &str, reason: impl Into<String>) -> Self {
        MechanismError::Formula {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }
}
