use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid gestational age: {0}")]
    InvalidGestationalAge(String),

    #[error("invalid sex code {0} (expected 1 or 2)")]
    InvalidSexCode(u8),

    #[error("unknown sex: {0}")]
    UnknownSex(String),

    #[error("unknown growth standard: {0}")]
    UnknownStandard(String),

    #[error("unknown measurement type: {0}")]
    UnknownMeasurementType(String),

    #[error("invalid age: {0}")]
    InvalidAge(String),

    #[error("date arithmetic error: {0}")]
    Date(#[from] jiff::Error),
}
