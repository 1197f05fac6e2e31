use thiserror::Error;

/// Errors raised by board operations.
///
/// A well-behaved host never triggers these: it creates the board before
/// pushing state and only references coordinates inside the grid. They exist
/// so that a misbehaving host surfaces a clear condition instead of silently
/// corrupting the view.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions: size {size}, section size {section_size}")]
    InvalidDimensions { size: u8, section_size: u8 },

    #[error("board has not been created")]
    BoardNotCreated,

    #[error("no cell at ({x}, {y})")]
    CellNotFound { x: u8, y: u8 },

    #[error("ready signal already received")]
    AlreadyReady,
}
