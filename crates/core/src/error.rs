use thiserror::Error;

/// Errors raised by board construction and wire-level parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Width or height of zero, or more cells than `MAX_BOARD_CELLS`
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Rows of differing lengths passed to `Board::from_rows`
    #[error("board rows must all have the same length")]
    RaggedRows,
    /// Board generation kept producing matches; the color palette or board size is unusable
    #[error("board generation did not settle after {passes} passes")]
    GenerationExhausted { passes: usize },
    /// Direction text outside up/down/left/right
    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),
}
