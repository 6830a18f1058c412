use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::{Color, Coord, Position};
use crate::error::SearchError;
use crate::evaluation::Evaluator;
use crate::movegen::Move;
use crate::oracle;

pub const DEFAULT_DEPTH: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u32,
    /// Seed for move shuffling. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

/// Depth-limited minimax with alpha-beta pruning, searching for one color.
///
/// Candidate moves are shuffled before they are explored so that equally
/// valued moves are not always resolved the same way. Every explored node
/// works on its own clone of the position.
pub struct Search<R = StdRng> {
    evaluator: Evaluator,
    color: Color,
    rng: R,
    nodes_searched: u64,
    cutoffs: u64,
}

impl Search<StdRng> {
    pub fn new(color: Color, config: &SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(color, rng)
    }
}

impl<R: Rng> Search<R> {
    pub fn with_rng(color: Color, rng: R) -> Self {
        Self {
            evaluator: Evaluator::new(color),
            color,
            rng,
            nodes_searched: 0,
            cutoffs: 0,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn evaluate(&self, position: &Position) -> i32 {
        self.evaluator.evaluate(position)
    }

    /// Pick a move for this search's color.
    ///
    /// Returns `Ok(None)` when there is nothing to play (the color is mated
    /// or has no pieces that can move). A position missing either king is
    /// rejected outright.
    pub fn select_move(
        &mut self,
        position: &Position,
        depth: u32,
    ) -> Result<Option<(Coord, Coord)>, SearchError> {
        for color in [Color::White, Color::Black] {
            oracle::king_square(position, color).ok_or(SearchError::KingNotFound(color))?;
        }

        self.nodes_searched = 0;
        self.cutoffs = 0;
        // The root always looks at least one ply ahead.
        let depth = depth.max(1);

        let mut moves = oracle::candidate_moves(position, self.color);
        moves.shuffle(&mut self.rng);

        let mut best: Option<(Move, i32)> = None;
        for mv in moves {
            let Some(child) = self.play(position, &mv) else {
                continue;
            };
            let value = self.minimax(&child, depth - 1, i32::MIN, i32::MAX, false);
            trace!("root {}{} scored {}", mv.from, mv.to, value);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
        }

        match best {
            Some((mv, value)) => debug!(
                "{} plays {}{} (value {}, depth {}, {} nodes, {} cutoffs)",
                self.color, mv.from, mv.to, value, depth, self.nodes_searched, self.cutoffs
            ),
            None => debug!("{} has no move available", self.color),
        }

        Ok(best.map(|(mv, _)| (mv.from, mv.to)))
    }

    /// Value of `position` for this search's color, looking `depth` plies
    /// ahead. `maximizing` selects whose turn it is in the tree: ours when
    /// true, the opponent's otherwise.
    ///
    /// A node with no candidate moves is scored like a leaf.
    pub fn minimax(
        &mut self,
        position: &Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return self.evaluate(position);
        }

        let acting = if maximizing {
            self.color
        } else {
            self.color.opposite()
        };
        let mut moves = oracle::candidate_moves(position, acting);
        if moves.is_empty() {
            return self.evaluate(position);
        }
        moves.shuffle(&mut self.rng);

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                let Some(child) = self.play(position, &mv) else {
                    continue;
                };
                let value = self.minimax(&child, depth - 1, alpha, beta, false);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    // Beta cut-off
                    self.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                let Some(child) = self.play(position, &mv) else {
                    continue;
                };
                let value = self.minimax(&child, depth - 1, alpha, beta, true);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    // Alpha cut-off
                    self.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }

    fn play(&self, position: &Position, mv: &Move) -> Option<Position> {
        let mut child = position.clone();
        match child.apply_move(mv.from, mv.to) {
            Ok(()) => Some(child),
            Err(err) => {
                trace!("skipping candidate: {}", err);
                None
            }
        }
    }

    pub fn get_nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    pub fn get_cutoffs(&self) -> u64 {
        self.cutoffs
    }
}
