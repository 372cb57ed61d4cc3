use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcgError {
    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    #[error("Invalid filter specification: {0}")]
    InvalidFilterSpecification(String),

    #[error("Signal too short for zero-phase filtering: {actual} samples, need at least {required}")]
    SignalTooShort { required: usize, actual: usize },

    #[error("Invalid extraction window: {0}")]
    InvalidWindow(String),

    #[error("Sample count mismatch: original has {original} samples, reconstructed has {reconstructed}")]
    LengthMismatch { original: usize, reconstructed: usize },
}

pub type Result<T> = std::result::Result<T, EcgError>;
