//! Check and checkmate detection.
//!
//! Everything here is built on pseudo-legal move generation, so "attacked"
//! means "reachable by some opposing pseudo-legal move". Pawn pushes count as
//! attacks and pawn diagonals only count when they would capture. Checkmate
//! only considers king relocation as an escape.

use std::collections::HashSet;

use crate::board::{Color, Coord, Piece, PieceKind, Position};
use crate::movegen::{self, Move};

pub fn king_square(position: &Position, color: Color) -> Option<Coord> {
    position
        .pieces_of(color)
        .find(|piece| piece.kind == PieceKind::King)
        .map(|piece| piece.coord)
}

/// The first opposing piece (in board order) that can reach `color`'s king.
/// `None` when the king is safe or absent.
pub fn checker(position: &Position, color: Color) -> Option<Piece> {
    let king = king_square(position, color)?;
    position
        .pieces_of(color.opposite())
        .find(|piece| movegen::targets(piece, position).any(|target| target == king))
        .copied()
}

pub fn is_in_check(position: &Position, color: Color) -> bool {
    checker(position, color).is_some()
}

/// Union of every square `by` can move to.
pub fn attacked_squares(position: &Position, by: Color) -> HashSet<Coord> {
    position
        .pieces_of(by)
        .flat_map(|piece| movegen::targets(piece, position))
        .collect()
}

/// King moves that land outside the opponent's reach.
pub fn king_evasions(position: &Position, color: Color) -> Vec<Move> {
    let Some(king) = king_square(position, color).and_then(|coord| position.piece(coord))
    else {
        return Vec::new();
    };
    let attacked = attacked_squares(position, color.opposite());
    movegen::moves_for(king, position)
        .into_iter()
        .filter(|mv| !attacked.contains(&mv.to))
        .collect()
}

/// Non-king moves landing on a square the checking piece can also reach.
pub fn attacker_defenses(position: &Position, color: Color, attacker: &Piece) -> Vec<Move> {
    let threatened: HashSet<Coord> = movegen::targets(attacker, position).collect();
    position
        .pieces_of(color)
        .filter(|piece| piece.kind != PieceKind::King)
        .flat_map(|piece| movegen::moves_for(piece, position))
        .filter(|mv| threatened.contains(&mv.to))
        .collect()
}

/// In check with every king move landing on an attacked square.
///
/// Blocking the check or capturing the checker is not considered, so this
/// reports mate in some positions where a defence exists.
pub fn is_in_checkmate(position: &Position, color: Color) -> bool {
    is_in_check(position, color) && king_evasions(position, color).is_empty()
}

/// The moves `color` may choose from in `position`.
///
/// Checkmate yields nothing. In check, king evasions come first, followed by
/// the defences against the checking piece. Otherwise every pseudo-legal
/// move of the color.
pub fn candidate_moves(position: &Position, color: Color) -> Vec<Move> {
    let Some(attacker) = checker(position, color) else {
        return movegen::generate_moves(position, color);
    };

    let mut moves = king_evasions(position, color);
    // Checkmate is exactly "in check with no evasion".
    if moves.is_empty() {
        return moves;
    }
    moves.extend(attacker_defenses(position, color, &attacker));
    moves
}
