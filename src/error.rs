use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size must be positive")]
    InvalidSize,
    #[error("Too many mines for the board size")]
    TooManyMines,
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
