use crate::board::{Color, Coord, Piece, PieceKind, Position};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

// Rook rays followed by bishop rays.
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

// Index 0 is the push, the rest are captures.
const WHITE_PAWN_STEPS: [(i8, i8); 3] = [(0, 1), (-1, 1), (1, 1)];
const BLACK_PAWN_STEPS: [(i8, i8); 3] = [(0, -1), (-1, -1), (1, -1)];

/// A candidate move produced for the search. Never stored beyond the node
/// that generated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl Move {
    pub fn new(piece: Piece, to: Coord, position: &Position) -> Self {
        Self {
            from: piece.coord,
            to,
            piece,
            captured: position.piece(to).copied(),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Material won by this move.
    pub fn points(&self) -> i32 {
        self.captured.map_or(0, |piece| piece.kind.value())
    }
}

#[derive(Debug, Clone, Copy)]
enum Stride {
    Pawn,
    Step,
    Ray,
}

/// Lazily walks the pseudo-legal destinations of one piece.
///
/// Borrowing the position keeps the sequence tied to the board it was made
/// from; a fresh call to [`targets`] starts over.
#[derive(Debug, Clone)]
pub struct Targets<'a> {
    position: &'a Position,
    origin: Coord,
    color: Color,
    stride: Stride,
    directions: &'static [(i8, i8)],
    index: usize,
    distance: i8,
}

impl<'a> Iterator for Targets<'a> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        loop {
            let &(df, dr) = self.directions.get(self.index)?;
            match self.stride {
                Stride::Pawn => {
                    let is_push = self.index == 0;
                    self.index += 1;
                    let Some(target) = self.origin.offset(df, dr) else {
                        continue;
                    };
                    let admissible = if is_push {
                        self.position.is_empty(target)
                    } else {
                        self.position.is_enemy(target, self.color)
                    };
                    if admissible {
                        return Some(target);
                    }
                }
                Stride::Step => {
                    self.index += 1;
                    let Some(target) = self.origin.offset(df, dr) else {
                        continue;
                    };
                    if self.position.is_empty(target)
                        || self.position.is_enemy(target, self.color)
                    {
                        return Some(target);
                    }
                }
                Stride::Ray => {
                    self.distance += 1;
                    let Some(target) = self.origin.offset(df * self.distance, dr * self.distance)
                    else {
                        self.next_ray();
                        continue;
                    };
                    if self.position.is_empty(target) {
                        return Some(target);
                    }
                    self.next_ray();
                    if self.position.is_enemy(target, self.color) {
                        return Some(target);
                    }
                }
            }
        }
    }
}

impl<'a> Targets<'a> {
    fn next_ray(&mut self) {
        self.index += 1;
        self.distance = 0;
    }
}

/// Pseudo-legal destinations of `piece`: its movement geometry only, with no
/// regard for the safety of its own king.
pub fn targets<'a>(piece: &Piece, position: &'a Position) -> Targets<'a> {
    let (stride, directions): (Stride, &'static [(i8, i8)]) = match piece.kind {
        PieceKind::Pawn => match piece.color {
            Color::White => (Stride::Pawn, &WHITE_PAWN_STEPS),
            Color::Black => (Stride::Pawn, &BLACK_PAWN_STEPS),
        },
        PieceKind::Knight => (Stride::Step, &KNIGHT_OFFSETS),
        PieceKind::King => (Stride::Step, &KING_OFFSETS),
        PieceKind::Rook => (Stride::Ray, &ROOK_DIRECTIONS),
        PieceKind::Bishop => (Stride::Ray, &BISHOP_DIRECTIONS),
        PieceKind::Queen => (Stride::Ray, &QUEEN_DIRECTIONS),
    };
    Targets {
        position,
        origin: piece.coord,
        color: piece.color,
        stride,
        directions,
        index: 0,
        distance: 0,
    }
}

/// Every pseudo-legal move of `piece` as a move candidate.
pub fn moves_for(piece: &Piece, position: &Position) -> Vec<Move> {
    targets(piece, position)
        .map(|to| Move::new(*piece, to, position))
        .collect()
}

/// Every pseudo-legal move of every `color` piece, in board order.
pub fn generate_moves(position: &Position, color: Color) -> Vec<Move> {
    position
        .pieces_of(color)
        .flat_map(|piece| moves_for(piece, position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn target_set(position: &Position, at: &str) -> BTreeSet<Coord> {
        let piece = position.piece(sq(at)).unwrap();
        targets(piece, position).collect()
    }

    fn set(squares: &[&str]) -> BTreeSet<Coord> {
        squares.iter().map(|s| sq(s)).collect()
    }

    #[test]
    fn test_initial_position_move_count() {
        let position = Position::new();
        // Single pawn pushes only: 8 pawn moves + 4 knight moves.
        assert_eq!(generate_moves(&position, Color::White).len(), 12);
        assert_eq!(generate_moves(&position, Color::Black).len(), 12);
    }

    #[test]
    fn test_pawn_moves() {
        let position = Position::from_fen("4k3/8/8/2p1p3/3P4/8/8/4K3 w").unwrap();
        assert_eq!(target_set(&position, "d4"), set(&["d5", "c5", "e5"]));

        let blocked = Position::from_fen("4k3/8/8/3p4/3P4/8/8/4K3 w").unwrap();
        assert!(target_set(&blocked, "d4").is_empty());
        assert!(target_set(&blocked, "d5").is_empty());
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let position = Position::from_fen("4k3/3p4/2P5/8/8/8/8/4K3 b").unwrap();
        assert_eq!(target_set(&position, "d7"), set(&["d6", "c6"]));
    }

    #[test]
    fn test_pawn_on_last_rank_has_no_moves() {
        let position = Position::from_fen("3Pk3/8/8/8/8/8/8/4K3 w").unwrap();
        assert!(target_set(&position, "d8").is_empty());
    }

    #[test]
    fn test_knight_offsets_clipped_and_filtered() {
        let position = Position::from_fen("4k3/8/8/8/8/8/2P5/N3K3 w").unwrap();
        // b3 is open, c2 holds a friendly pawn.
        assert_eq!(target_set(&position, "a1"), set(&["b3"]));

        let centre = Position::from_fen("4k3/8/2p5/8/3N4/8/8/4K3 w").unwrap();
        assert_eq!(
            target_set(&centre, "d4"),
            set(&["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"])
        );
    }

    #[test]
    fn test_king_offsets() {
        let position = Position::from_fen("4k3/8/8/8/8/8/3P4/3K4 w").unwrap();
        assert_eq!(
            target_set(&position, "d1"),
            set(&["c1", "e1", "c2", "e2"])
        );
    }

    #[test]
    fn test_rook_rays_stop_at_first_piece() {
        let position = Position::from_fen("4k3/8/8/3p4/8/8/3R1P2/4K3 w").unwrap();
        assert_eq!(
            target_set(&position, "d2"),
            set(&["d1", "d3", "d4", "d5", "a2", "b2", "c2", "e2"])
        );
    }

    #[test]
    fn test_bishop_rays() {
        let position = Position::from_fen("4k3/8/8/8/8/4p3/3B4/2P1K3 w").unwrap();
        assert_eq!(
            target_set(&position, "d2"),
            set(&["e3", "c3", "b4", "a5"])
        );
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        let fen = "4k3/1p6/8/8/4Q3/8/4P3/3K4 w";
        let position = Position::from_fen(fen).unwrap();
        let queen = target_set(&position, "e4");

        let mut as_rook = Position::from_fen(fen).unwrap();
        as_rook.place(PieceKind::Rook, Color::White, sq("e4"));
        let mut as_bishop = Position::from_fen(fen).unwrap();
        as_bishop.place(PieceKind::Bishop, Color::White, sq("e4"));

        let union: BTreeSet<Coord> = target_set(&as_rook, "e4")
            .union(&target_set(&as_bishop, "e4"))
            .copied()
            .collect();
        assert_eq!(queen, union);
        assert!(queen.contains(&sq("b7")));
        assert!(!queen.contains(&sq("a8")));
        assert!(!queen.contains(&sq("e2")));
    }

    #[test]
    fn test_move_candidate_capture_points() {
        let position = Position::from_fen("4k3/3r4/8/8/8/8/8/3QK3 w").unwrap();
        let moves = generate_moves(&position, Color::White);
        let capture = moves.iter().find(|mv| mv.to == sq("d7")).unwrap();
        assert!(capture.is_capture());
        assert_eq!(capture.points(), 5);
        assert_eq!(capture.from, sq("d1"));
        let quiet = moves.iter().find(|mv| mv.to == sq("d2")).unwrap();
        assert!(!quiet.is_capture());
        assert_eq!(quiet.points(), 0);
    }
}
