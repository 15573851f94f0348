use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("failed to encode transaction body: {0}")]
    Encoding(String),
}

impl From<bincode::Error> for TransactionError {
    fn from(e: bincode::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}
