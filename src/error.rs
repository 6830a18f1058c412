use thiserror::Error;

use crate::board::{Color, Coord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("invalid square notation '{0}'")]
    InvalidNotation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN placement must have 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("invalid piece character '{0}' in FEN")]
    InvalidPiece(char),
    #[error("rank {rank} describes {files} files")]
    WrongFileCount { rank: usize, files: usize },
    #[error("invalid side to move '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),
    #[error("empty FEN string")]
    Empty,
}

/// Failure of `Position::apply_move`. The position is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    EmptySource(Coord),
    #[error("{to} is not a legal destination from {from}")]
    Illegal { from: Coord, to: Coord },
    #[error(transparent)]
    Notation(#[from] CoordError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no {0} king on the board")]
    KingNotFound(Color),
}
