use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::{Color, Coord, Position};
use crate::error::SearchError;
use crate::oracle;
use crate::search::{Search, SearchConfig};

/// A player that can be asked for a move once per turn.
///
/// `Ok(None)` means the player has no move; the caller decides whether that
/// ends the game.
pub trait Agent {
    fn color(&self) -> Color;
    fn choose_action(
        &mut self,
        position: &Position,
    ) -> Result<Option<(Coord, Coord)>, SearchError>;
}

pub struct MinimaxAgent<R = StdRng> {
    search: Search<R>,
    depth: u32,
}

impl MinimaxAgent<StdRng> {
    pub fn new(color: Color, config: &SearchConfig) -> Self {
        Self {
            search: Search::new(color, config),
            depth: config.depth,
        }
    }
}

impl<R: Rng> MinimaxAgent<R> {
    pub fn with_search(search: Search<R>, depth: u32) -> Self {
        Self { search, depth }
    }

    pub fn search(&self) -> &Search<R> {
        &self.search
    }
}

impl<R: Rng> Agent for MinimaxAgent<R> {
    fn color(&self) -> Color {
        self.search.color()
    }

    fn choose_action(
        &mut self,
        position: &Position,
    ) -> Result<Option<(Coord, Coord)>, SearchError> {
        self.search.select_move(position, self.depth)
    }
}

/// Plays a uniformly random candidate move. Used as a baseline opponent.
pub struct RandomAgent<R = StdRng> {
    color: Color,
    rng: R,
}

impl RandomAgent<StdRng> {
    pub fn new(color: Color, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { color, rng }
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn with_rng(color: Color, rng: R) -> Self {
        Self { color, rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn color(&self) -> Color {
        self.color
    }

    fn choose_action(
        &mut self,
        position: &Position,
    ) -> Result<Option<(Coord, Coord)>, SearchError> {
        let moves = oracle::candidate_moves(position, self.color);
        Ok(moves.choose(&mut self.rng).map(|mv| (mv.from, mv.to)))
    }
}
