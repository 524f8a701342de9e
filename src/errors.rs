use chrono::NaiveDate;
use thiserror::Error;

/// Error type that captures projection and ledger failures.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Account not found: {0}")]
    UnknownAccount(String),
    #[error("Duplicate account: {0}")]
    DuplicateAccount(String),
    #[error("Transfer direction must be one of \"to\", \"from\" in `{definition}`. Received: {direction}")]
    InvalidTransferDirection {
        definition: String,
        direction: String,
    },
    #[error("Date {date} is before the start date of account `{account}` ({start_date})")]
    OutOfBoundsBalanceQuery {
        account: String,
        date: NaiveDate,
        start_date: NaiveDate,
    },
    #[error("Expected account id: {expected} Received: {received}")]
    MismatchedAccountOnAppend { expected: String, received: String },
    #[error("Invalid specification: {0}")]
    InvalidSpec(String),
    #[error("Invalid window: end {end} is before start {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("Settlement failed: {0}")]
    Settlement(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
