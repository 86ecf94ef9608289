//! A player which makes purely random moves

use board::Position;
use game::{GameState, SelectionKind};

use rand::{rngs::SmallRng, seq::IteratorRandom, SeedableRng};

/// A player which makes purely random moves
///
/// The name is pronounced like "Monkey"
///
/// It never moves a pawn onto its far row, since promotion is not supported.
#[derive(Debug)]
pub struct MonkePlayer {
    /// How we decide what to do
    rng: SmallRng,
}

impl MonkePlayer {
    /// Create a new player seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a new player which always plays the same way for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

/// Whether the monke is willing to move to a square with this tag
fn acceptable(kind: SelectionKind) -> bool {
    kind.is_target() && kind != SelectionKind::Promotion
}

/// The squares holding a piece of the side to move that has somewhere acceptable to go
pub fn movable_pieces(game: &GameState) -> impl Iterator<Item = Position> + '_ {
    game.board()
        .pieces()
        .filter(|(_, piece)| piece.owner == game.turn())
        .filter(|&(origin, piece)| {
            let mut lifted = game.board().clone();
            lifted.take(origin);
            movegen::selections(&lifted, piece, origin, game.last_double_move())
                .targets()
                .any(|(_, kind)| acceptable(kind))
        })
        .map(|(origin, _)| origin)
}

impl players::Player for MonkePlayer {
    fn next_release(&mut self, game: &GameState) -> Option<Position> {
        let square = match (game.origin(), game.targets()) {
            (Some(origin), Some(targets)) => targets
                .targets()
                .filter(|&(_, kind)| acceptable(kind))
                .map(|(target, _)| target)
                .choose(&mut self.rng)
                // Nothing acceptable: put the piece back down
                .unwrap_or(origin),
            _ => movable_pieces(game).choose(&mut self.rng)?,
        };
        tracing::trace!(%square, "monke chose square");
        Some(square)
    }
}

impl Default for MonkePlayer {
    fn default() -> Self {
        Self::new()
    }
}
