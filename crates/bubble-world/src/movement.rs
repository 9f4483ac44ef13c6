//! Sources of per-step moves for mobile objects.
//!
//! The random choice of direction is the only nondeterministic input of a run,
//! so it is injected through [`MovementSource`] instead of being drawn from a
//! global generator.

use bubble_core::Move;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Supplies the next move for a mobile object
pub trait MovementSource {
    fn next_move(&mut self) -> Move;
}

/// Uniform choice over the five moves, driven by a seeded ChaCha8 generator
#[derive(Debug, Clone)]
pub struct RandomMovement {
    rng: ChaCha8Rng,
}

impl RandomMovement {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl MovementSource for RandomMovement {
    fn next_move(&mut self) -> Move {
        let moves = Move::all();
        moves[self.rng.gen_range(0..moves.len())]
    }
}

/// Always returns the same move
#[derive(Debug, Clone, Copy)]
pub struct FixedMovement(pub Move);

impl MovementSource for FixedMovement {
    fn next_move(&mut self) -> Move {
        self.0
    }
}

/// Replays a recorded sequence of moves, wrapping around at the end
#[derive(Debug, Clone, Default)]
pub struct ScriptedMovement {
    script: Vec<Move>,
    cursor: usize,
}

impl ScriptedMovement {
    pub fn new(script: Vec<Move>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Record `count` moves drawn from another source
    pub fn record(source: &mut impl MovementSource, count: usize) -> Self {
        Self::new((0..count).map(|_| source.next_move()).collect())
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl MovementSource for ScriptedMovement {
    fn next_move(&mut self) -> Move {
        if self.script.is_empty() {
            return Move::Stay;
        }

        let next = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        next
    }
}
