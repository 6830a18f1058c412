use std::fmt;
use std::str::FromStr;

use crate::error::{CoordError, FenError, MoveError};
use crate::movegen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material worth of the piece. The king is worth nothing: the game is
    /// decided by mate, not by counting it.
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    pub fn notation(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_notation(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A square coordinate. Rank 0 is white's back rank, file 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    file: u8,
    rank: u8,
}

impl Coord {
    pub fn new(file: u8, rank: u8) -> Option<Coord> {
        if file < 8 && rank < 8 {
            Some(Coord { file, rank })
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Option<Coord> {
        if index < 64 {
            Some(Coord {
                file: (index % 8) as u8,
                rank: (index / 8) as u8,
            })
        } else {
            None
        }
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn index(&self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Coord> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Coord {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        (0..64).filter_map(Coord::from_index)
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(CoordError::InvalidNotation(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Coord::new(file, rank).ok_or_else(|| CoordError::InvalidNotation(s.to_string()))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, (b'1' + self.rank) as char)
    }
}

/// A piece on the board. `coord` mirrors the square that hosts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub coord: Coord,
}

impl Piece {
    pub fn notation(&self) -> char {
        match self.color {
            Color::White => self.kind.notation(),
            Color::Black => self.kind.notation().to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    coord: Coord,
    occupant: Option<Piece>,
}

impl Square {
    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn occupant(&self) -> Option<&Piece> {
        self.occupant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Read-only access to a board owned by someone else. Anything that can
/// answer these two questions can be snapshotted into a [`Position`].
pub trait BoardView {
    fn side_to_move(&self) -> Color;
    fn piece_at(&self, coord: Coord) -> Option<(PieceKind, Color)>;
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Board state: 64 squares in index order plus the side to move.
///
/// `Clone` is a full deep copy; the search clones one of these per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: Vec<Square>,
    turn: Color,
}

impl Position {
    pub fn empty(turn: Color) -> Self {
        Self {
            squares: Coord::all()
                .map(|coord| Square {
                    coord,
                    occupant: None,
                })
                .collect(),
            turn,
        }
    }

    /// The standard starting arrangement, white to move.
    pub fn new() -> Self {
        let mut position = Position::empty(Color::White);
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            position.place_at(kind, Color::White, file, 0);
            position.place_at(PieceKind::Pawn, Color::White, file, 1);
            position.place_at(PieceKind::Pawn, Color::Black, file, 6);
            position.place_at(kind, Color::Black, file, 7);
        }
        position
    }

    /// Snapshot any board into an independent position.
    pub fn copy_from<V: BoardView + ?Sized>(source: &V) -> Self {
        let mut position = Position::empty(source.side_to_move());
        for coord in Coord::all() {
            if let Some((kind, color)) = source.piece_at(coord) {
                position.place(kind, color, coord);
            }
        }
        position
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::Empty)?;
        let turn = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount(ranks.len()));
        }

        let mut position = Position::empty(turn);
        for (row, text) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0usize;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as usize;
                    continue;
                }
                let kind = PieceKind::from_notation(c).ok_or(FenError::InvalidPiece(c))?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if file >= 8 {
                    return Err(FenError::WrongFileCount {
                        rank: rank as usize + 1,
                        files: file + 1,
                    });
                }
                position.place_at(kind, color, file as u8, rank);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::WrongFileCount {
                    rank: rank as usize + 1,
                    files: file,
                });
            }
        }
        Ok(position)
    }

    /// Piece placement and side to move. Castling, en passant and clocks are
    /// not tracked and always render as `- - 0 1`.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8u8).rev() {
            let mut gap = 0;
            for file in 0..8u8 {
                match self.squares[rank as usize * 8 + file as usize].occupant() {
                    Some(piece) => {
                        if gap > 0 {
                            fen.push_str(&gap.to_string());
                            gap = 0;
                        }
                        fen.push(piece.notation());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                fen.push_str(&gap.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        let side = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {} - - 0 1", fen, side)
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn square(&self, coord: Coord) -> &Square {
        &self.squares[coord.index()]
    }

    /// The square at raw coordinates, or `None` when they fall off the board.
    pub fn square_at(&self, file: i8, rank: i8) -> Option<&Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            self.squares.get(rank as usize * 8 + file as usize)
        } else {
            None
        }
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn piece(&self, coord: Coord) -> Option<&Piece> {
        self.square(coord).occupant()
    }

    pub fn is_empty(&self, coord: Coord) -> bool {
        self.square(coord).is_empty()
    }

    /// True when `coord` holds a piece of the other color.
    pub fn is_enemy(&self, coord: Coord, color: Color) -> bool {
        self.piece(coord).map_or(false, |piece| piece.color != color)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().filter_map(Square::occupant)
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.color == color)
    }

    /// Put a piece on `coord`, replacing whatever stood there.
    pub fn place(&mut self, kind: PieceKind, color: Color, coord: Coord) {
        self.squares[coord.index()].occupant = Some(Piece { kind, color, coord });
    }

    pub fn remove(&mut self, coord: Coord) -> Option<Piece> {
        self.squares[coord.index()].occupant.take()
    }

    fn place_at(&mut self, kind: PieceKind, color: Color, file: u8, rank: u8) {
        if let Some(coord) = Coord::new(file, rank) {
            self.place(kind, color, coord);
        }
    }

    /// Move the piece on `from` to `to` if `to` is one of its pseudo-legal
    /// targets. Captures whatever occupies `to` and passes the turn.
    ///
    /// Does not look at the mover's king: a move that leaves it attacked is
    /// still applied. On error nothing changes.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Result<(), MoveError> {
        let piece = *self.piece(from).ok_or(MoveError::EmptySource(from))?;
        if !movegen::targets(&piece, self).any(|target| target == to) {
            return Err(MoveError::Illegal { from, to });
        }

        self.squares[from.index()].occupant = None;
        self.squares[to.index()].occupant = Some(Piece { coord: to, ..piece });
        self.turn = self.turn.opposite();
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl BoardView for Position {
    fn side_to_move(&self) -> Color {
        self.turn
    }

    fn piece_at(&self, coord: Coord) -> Option<(PieceKind, Color)> {
        self.piece(coord).map(|piece| (piece.kind, piece.color))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = String::new();
        for rank in (0..8).rev() {
            for file in 0..8 {
                let square = &self.squares[rank * 8 + file];
                result.push(square.occupant().map_or('.', Piece::notation));
                if file < 7 {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}
