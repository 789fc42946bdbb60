use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum LoanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} does not return a new period date")]
    DateOutOfRange(NaiveDate),
}

pub type Result<T> = std::result::Result<T, LoanError>;
