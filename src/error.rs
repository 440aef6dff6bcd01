use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    /// Every failing field of the request, not just the first.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("insufficient funds: total price {required} exceeds wallet balance {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },
    #[error("booking {0} not found")]
    NotFound(String),
    #[error("booking {0} is already cancelled")]
    AlreadyCancelled(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Storage(format!("collection serialization error: {err}"))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for BookingError {
    fn from(err: rocksdb::Error) -> Self {
        BookingError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
