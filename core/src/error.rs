use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Channel is not open")]
    NotOpen,
    #[error("Could not connect: {0}")]
    Connect(String),
    #[error("Transport rejected frame: {0}")]
    Rejected(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Could not persist identity: {0}")]
    Storage(String),
}
