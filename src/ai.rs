//! Automated opponent move selection.

use crate::board::{Board, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Single-capability interface of the automated opponent: pick a legal
/// cell or report that none is available. Implementations must not
/// mutate the board.
pub trait MoveSource {
    /// Returns a cell from the board's legal-move set, or `None` when the
    /// set is empty.
    fn choose_move(&mut self, board: &Board) -> Option<Position>;
}

/// Production chooser: uniformly random over the legal-move set.
#[derive(Debug)]
pub struct RandomAi {
    rng: StdRng,
}

impl RandomAi {
    /// Creates a chooser seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a chooser with a fixed seed, for reproducible games.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAi {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for RandomAi {
    fn choose_move(&mut self, board: &Board) -> Option<Position> {
        let legal: Vec<Position> = board.legal_positions_by_adjacency().into_iter().collect();
        legal.choose(&mut self.rng).copied()
    }
}

/// Deterministic chooser: the first legal position in row-major order.
/// Useful for scripted games and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegalAi;

impl MoveSource for FirstLegalAi {
    fn choose_move(&mut self, board: &Board) -> Option<Position> {
        board.legal_positions_by_adjacency().into_iter().next()
    }
}
