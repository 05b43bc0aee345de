use cw_core::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CanvasError>;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("unable to parse draw configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("unable to read draw configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl CanvasError {
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CanvasError::Core(err) if err.is_contract_violation())
    }
}
