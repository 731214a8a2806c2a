use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Board has no cells")]
    EmptyBoard,
    #[error("Board rows do not all have the same length")]
    InvalidBoardShape,
    #[error("Cell stored at ({row}, {column}) reports a different position")]
    CellPositionMismatch { row: usize, column: usize },
}

pub type Result<T> = core::result::Result<T, ProtocolError>;
