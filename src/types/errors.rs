use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MonetaryError {
    #[error("Monetary error: {0}")]
    InvalidFormat(String),
    #[error("Monetary error: [{0}] has more than two decimal places")]
    TooManyDecimalPlaces(String),
    #[error("Monetary error: Overflow")]
    Overflow
}
