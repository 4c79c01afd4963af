use thiserror::Error;

use crate::content::ContentLoadError;

#[derive(Error, Debug)]
pub enum EconomyError {
    #[error("Building blueprint not found: {0}")]
    MissingBuilding(String),

    #[error("Unit blueprint not found: {0}")]
    MissingUnit(String),

    #[error("Unrecognized production category: {0}")]
    UnknownCategory(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Planet {planet} is not owned by realm {realm}")]
    OwnerMismatch { planet: String, realm: u32 },

    #[error("Content error: {0}")]
    Content(#[from] ContentLoadError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl EconomyError {
    /// Configuration errors are content/data bugs, never a normal runtime path
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EconomyError::MissingBuilding(_)
                | EconomyError::MissingUnit(_)
                | EconomyError::UnknownCategory(_)
                | EconomyError::InvalidConfig(_)
                | EconomyError::Content(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EconomyError>;
