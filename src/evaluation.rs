use crate::board::{Color, PieceKind, Position};

/// Material-only evaluation from the point of view of one color.
#[derive(Debug, Clone)]
pub struct Evaluator {
    pub perspective: Color,

    // Piece values
    pub pawn_value: i32,
    pub knight_value: i32,
    pub bishop_value: i32,
    pub rook_value: i32,
    pub queen_value: i32,
    pub king_value: i32,
}

impl Evaluator {
    pub fn new(perspective: Color) -> Self {
        Self {
            perspective,
            pawn_value: PieceKind::Pawn.value(),
            knight_value: PieceKind::Knight.value(),
            bishop_value: PieceKind::Bishop.value(),
            rook_value: PieceKind::Rook.value(),
            queen_value: PieceKind::Queen.value(),
            king_value: PieceKind::King.value(),
        }
    }

    /// Sum of piece values, own pieces positive, opposing pieces negative.
    pub fn evaluate(&self, position: &Position) -> i32 {
        position
            .pieces()
            .map(|piece| {
                let value = self.get_piece_value(piece.kind);
                if piece.color == self.perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }

    fn get_piece_value(&self, piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => self.pawn_value,
            PieceKind::Knight => self.knight_value,
            PieceKind::Bishop => self.bishop_value,
            PieceKind::Rook => self.rook_value,
            PieceKind::Queen => self.queen_value,
            PieceKind::King => self.king_value,
        }
    }
}
