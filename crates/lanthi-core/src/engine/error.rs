use thiserror::Error;

use super::config::ConfigError;
use crate::core::chemistry::masses::UnknownResidueError;
use crate::core::models::record::RecordError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A residue or modification code reached the mass table without an
    /// entry. Indicates a defect in modification enumeration.
    #[error("Mass calculation failed: {0}")]
    UnknownResidue(#[from] UnknownResidueError),

    #[error("CDS {locus} is a precursor candidate but has no translation")]
    MissingTranslation { locus: String },

    #[error("Locus not found in record: {0}")]
    UnknownLocus(String),

    #[error("Translation of {locus} contains invalid character '{residue}'")]
    InvalidTranslation { locus: String, residue: char },

    #[error("Record error: {0}")]
    Record(RecordError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl From<RecordError> for EngineError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::MissingTranslation { locus } => EngineError::MissingTranslation { locus },
            RecordError::UnknownLocus(locus) => EngineError::UnknownLocus(locus),
            other => EngineError::Record(other),
        }
    }
}
