use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration, bombs do not fit on the board")]
    InvalidConfiguration,
    #[error("Invalid tile position")]
    InvalidPosition,
    #[error("Board tiles do not match its dimensions or bomb count")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
