use thiserror::Error;

/// Why a conversion could not run. The messages are shown to the user
/// verbatim, in place of a result sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("Please provide a valid number")]
    InvalidNumber,

    #[error("Please provide a valid unit")]
    InvalidUnit,

    #[error("Please provide a valid scale")]
    InvalidScale,

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}
