pub mod agent;
pub mod board;
pub mod error;
pub mod evaluation;
pub mod movegen;
pub mod oracle;
pub mod search;
pub mod uci;

pub use agent::{Agent, MinimaxAgent, RandomAgent};
pub use board::{BoardView, Color, Coord, Piece, PieceKind, Position, Square};
pub use error::{CoordError, FenError, MoveError, SearchError};
pub use search::{Search, SearchConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::generate_moves;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_position() {
        let position = Position::new();
        let moves = generate_moves(&position, Color::White);

        // Single pushes and knight hops only
        assert_eq!(moves.len(), 12);

        // Every generated move can be applied
        for mv in moves {
            let mut copy = position.clone();
            assert!(copy.apply_move(mv.from, mv.to).is_ok());
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let position = Position::new();
        let mut copy = position.clone();
        copy.apply_move(sq("b1"), sq("c3")).unwrap();
        copy.remove(sq("e8"));

        assert_eq!(position, Position::new());
        assert_eq!(
            position.piece_at(sq("b1")),
            Some((PieceKind::Knight, Color::White))
        );
        assert!(oracle::king_square(&position, Color::Black).is_some());
    }

    #[test]
    fn test_no_castling_or_double_step() {
        let mut position = Position::from_fen("r3k2r/8/8/8/8/8/4P3/R3K2R w").unwrap();
        assert!(position.apply_move(sq("e1"), sq("g1")).is_err());
        assert!(position.apply_move(sq("e1"), sq("c1")).is_err());
        assert!(position.apply_move(sq("e2"), sq("e4")).is_err());
    }

    #[test]
    fn test_pawn_reaching_last_rank_stays_a_pawn() {
        let mut position = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w").unwrap();
        position.apply_move(sq("a7"), sq("a8")).unwrap();
        assert_eq!(
            position.piece_at(sq("a8")),
            Some((PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn test_apply_move_ignores_own_king_safety() {
        // The e2 rook is pinned against its king but may still step aside.
        let mut position = Position::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w").unwrap();
        position.apply_move(sq("e2"), sq("a2")).unwrap();
        assert!(oracle::is_in_check(&position, Color::White));
    }

    #[test]
    fn test_search_reply_to_check() {
        // White is checked by the a1 rook; the search may only pick an
        // evasion or a move onto the rook's line.
        let position = Position::from_fen("4k3/8/8/8/8/3N4/8/r3K3 w").unwrap();
        let mut search = Search::new(
            Color::White,
            &SearchConfig {
                depth: 2,
                seed: Some(4),
            },
        );
        let (from, to) = search.select_move(&position, 2).unwrap().unwrap();
        let candidates = oracle::candidate_moves(&position, Color::White);
        assert!(candidates.iter().any(|mv| mv.from == from && mv.to == to));
    }
}
