use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum CoreError {
    /// The caller (usually the state store) handed us something that breaks
    /// an invariant: out-of-range coordinates, zero-sized boards, ragged
    /// grids, trails that were edited instead of grown or reset.
    ///
    /// Fatal to the call. Nothing is clamped, and the caller keeps the last
    /// state that was applied successfully.
    #[error("Contract violation [{0}]")]
    ContractViolation(String),
}

impl CoreError {
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CoreError::ContractViolation(_))
    }
}

pub trait ErrorMsg {
    fn violation<T>(&self) -> Result<T>;
    fn violation_msg(&self) -> CoreError;
}

impl ErrorMsg for str {
    fn violation<T>(&self) -> Result<T> {
        Err(self.violation_msg())
    }

    fn violation_msg(&self) -> CoreError {
        log::debug!("Contract violation: {}", self);
        CoreError::ContractViolation(self.to_string())
    }
}

impl ErrorMsg for String {
    fn violation<T>(&self) -> Result<T> {
        self.as_str().violation()
    }

    fn violation_msg(&self) -> CoreError {
        self.as_str().violation_msg()
    }
}
